//! Runtime-schema tables: loading rows from cells and querying them.

use std::collections::HashSet;

use lookup_index::{
    ColumnKind, ColumnSpec, IndexError, IndexSchema, RangeType, RowKey, SearchStructure,
    TableIndex, TwoColumnRange, Value, ValueType,
};
use test_case::test_case;

const SHIPPING: &[(&[&str], &str)] = &[
    (&["DE", "0", "[2020,2023)"], "de-2020"),
    (&["DE", "0", "[2023,)"], "de-2023"),
    (&["DE", "20", "[2020,)"], "de-heavy"),
    (&["FR", "0", "(,)"], "fr-flat"),
    (&["FR", "0", "2024"], "fr-promo"),
];

fn shipping() -> TableIndex {
    let schema: IndexSchema = "exact:text,lower_bound_equal:int,interval:int"
        .parse()
        .expect("valid schema");
    let mut index = TableIndex::new(schema);
    for (cells, payload) in SHIPPING {
        index.insert_cells(cells, payload.to_string()).expect("valid row");
    }
    index
}

fn payloads(values: &[&str]) -> HashSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test_case(&["DE", "5", "2021"], &["de-2020"] ; "light parcel before switch")]
#[test_case(&["DE", "5", "2023"], &["de-2023"] ; "light parcel at switch")]
#[test_case(&["DE", "25", "2021"], &["de-heavy"] ; "heavy parcel")]
#[test_case(&["DE", "25", "2019"], &[] ; "heavy parcel before validity")]
#[test_case(&["FR", "1", "2024"], &["fr-flat", "fr-promo"] ; "point interval overlapping open one")]
#[test_case(&["FR", "1", "2025"], &["fr-flat"] ; "after point interval")]
#[test_case(&["IT", "1", "2024"], &[] ; "unknown exact key")]
#[test_case(&["DE", "-1", "2024"], &[] ; "below the first range bound")]
fn resolves_cell_queries(cells: &[&str], expected: &[&str]) {
    let index = shipping();
    assert_eq!(index.query_cells(cells).expect("valid query"), payloads(expected));
}

#[test]
fn rows_and_payloads_are_counted() {
    let index = shipping();
    assert_eq!(index.rows(), SHIPPING.len());
    assert_eq!(index.results().len(), SHIPPING.len());
}

#[test]
fn typed_rows_and_queries() {
    let schema = IndexSchema::new(vec![
        ColumnSpec::new(ColumnKind::Range(RangeType::UpperBoundEqual), ValueType::Int),
        ColumnSpec::new(ColumnKind::Exact, ValueType::Text),
    ])
    .expect("valid schema");
    let mut index: TableIndex<u32> = TableIndex::new(schema);
    index
        .insert_row(vec![RowKey::Point(Value::Int(100)), RowKey::Point("a".into())], 1)
        .expect("valid row");
    index
        .insert_row(vec![RowKey::Point(Value::Int(200)), RowKey::Point("a".into())], 2)
        .expect("valid row");

    assert_eq!(index.query(&[Value::Int(50), "a".into()]), Ok(HashSet::from([1])));
    assert_eq!(index.query(&[Value::Int(150), "a".into()]), Ok(HashSet::from([2])));
    assert_eq!(index.query(&[Value::Int(250), "a".into()]), Ok(HashSet::new()));
    assert_eq!(index.query(&[Value::Int(50), "b".into()]), Ok(HashSet::new()));
}

#[test]
fn rejects_rows_that_do_not_fit_the_schema() {
    let mut index = shipping();

    assert!(matches!(
        index.insert_cells(&["DE", "0"], "short".to_string()),
        Err(IndexError::ArityMismatch { expected: 3, found: 2 })
    ));
    assert!(matches!(
        index.insert_cells(&["DE", "zero", "[0,1]"], "bad".to_string()),
        Err(IndexError::InvalidValue { column: 1, .. })
    ));
    assert!(matches!(
        index.insert_cells(&["DE", "0", "[5,1]"], "empty".to_string()),
        Err(IndexError::InvalidValue { column: 2, .. })
    ));
    assert!(matches!(
        index.insert_row(
            vec![
                RowKey::Point("DE".into()),
                RowKey::Interval(TwoColumnRange::unbounded()),
                RowKey::Point(Value::Int(3)),
            ],
            "shape".to_string(),
        ),
        Err(IndexError::TypeMismatch { column: 1, .. })
    ));
    assert_eq!(index.rows(), SHIPPING.len());
}

#[test]
fn copy_and_merge_keep_tables_independent() {
    let original = shipping();
    let mut copy = original.copy();

    let mut update = TableIndex::new(original.schema().clone());
    update
        .insert_cells(&["IT", "0", "(,)"], "it-flat".to_string())
        .expect("valid row");
    copy.merge(&update).expect("same schema");

    assert_eq!(copy.query_cells(&["IT", "3", "2024"]), Ok(payloads(&["it-flat"])));
    assert_eq!(original.query_cells(&["IT", "3", "2024"]), Ok(HashSet::new()));
    assert_eq!(copy.rows(), original.rows() + 1);
}

#[test_case("" ; "no columns")]
#[test_case("exact,sideways" ; "unknown kind")]
#[test_case("interval:float" ; "unknown type")]
fn rejects_bad_schemas(raw: &str) {
    assert!(matches!(
        raw.parse::<IndexSchema>(),
        Err(IndexError::InvalidConfiguration(_))
    ));
}

#[test]
fn schema_round_trips_through_display() {
    let schema: IndexSchema = "exact, upper_bound_equal:int, interval".parse().expect("valid schema");
    let rendered = schema.to_string();
    assert_eq!(rendered, "exact:text,upper_bound_equal:int,interval:int");
    assert_eq!(rendered.parse::<IndexSchema>(), Ok(schema));
}
