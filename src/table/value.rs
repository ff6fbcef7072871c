use std::fmt;
use std::str::FromStr;

use crate::interval::TwoColumnRange;
use crate::IndexError;

/// Dynamically typed cell key.
///
/// Ordered within a type; across types every `Int` sorts before every `Text`,
/// but schemas never mix the two within a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Signed integer key.
    Int(i64),
    /// Text key, compared lexicographically.
    Text(String),
}

impl Value {
    /// Type tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Text(_) => ValueType::Text,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Cell type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValueType {
    /// `i64` cells.
    Int,
    /// Free text cells.
    Text,
}

impl ValueType {
    /// Parse one cell of this type; the error is a human-readable reason.
    pub fn parse(&self, raw: &str) -> Result<Value, String> {
        let raw = raw.trim();
        match self {
            ValueType::Int => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|err| err.to_string()),
            ValueType::Text => Ok(Value::Text(raw.to_string())),
        }
    }

    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Text => "text",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(ValueType::Int),
            "text" | "string" => Ok(ValueType::Text),
            other => Err(IndexError::InvalidConfiguration(format!(
                "unknown value type '{other}'"
            ))),
        }
    }
}

/// Parse an interval cell.
///
/// Accepted forms: `[a,b]`, `(a,b)`, `[a,b)`, `(a,b]` with an empty side for
/// infinity, `a..b` (closed, either side may be empty), or a single value `a`
/// meaning `[a,a]`.
pub(crate) fn parse_interval(raw: &str, value_type: ValueType) -> Result<TwoColumnRange<Value>, String> {
    let raw = raw.trim();
    let bracketed = raw
        .strip_prefix(['[', '('])
        .and_then(|rest| rest.strip_suffix([']', ')']));

    let (lower, upper, lower_inclusive, upper_inclusive) = match bracketed {
        Some(inner) => {
            let (lower, upper) = inner
                .split_once(',')
                .ok_or_else(|| "expected 'lower,upper' inside brackets".to_string())?;
            (lower, upper, raw.starts_with('['), raw.ends_with(']'))
        }
        None => match raw.split_once("..") {
            Some((lower, upper)) => (lower, upper, true, true),
            None => (raw, raw, true, true),
        },
    };

    let bound = |side: &str| -> Result<Option<Value>, String> {
        if side.trim().is_empty() {
            Ok(None)
        } else {
            value_type.parse(side).map(Some)
        }
    };
    TwoColumnRange::new(bound(lower)?, bound(upper)?, lower_inclusive, upper_inclusive)
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::{LowerBound, UpperBound};

    #[test]
    fn parses_typed_cells() {
        assert_eq!(ValueType::Int.parse(" 42 "), Ok(Value::Int(42)));
        assert_eq!(ValueType::Text.parse("gold"), Ok(Value::from("gold")));
        assert!(ValueType::Int.parse("gold").is_err());
        assert_eq!("integer".parse::<ValueType>().ok(), Some(ValueType::Int));
        assert!("float".parse::<ValueType>().is_err());
    }

    #[test]
    fn parses_bracket_notation() {
        let range = parse_interval("(10, 20]", ValueType::Int).expect("valid interval");
        assert_eq!(range.lower(), &LowerBound::Exclusive(Value::Int(10)));
        assert_eq!(range.upper(), &UpperBound::Inclusive(Value::Int(20)));

        let open = parse_interval("[5,)", ValueType::Int).expect("valid interval");
        assert_eq!(open.upper(), &UpperBound::Unbounded);
    }

    #[test]
    fn parses_dots_and_points() {
        let range = parse_interval("..7", ValueType::Int).expect("valid interval");
        assert_eq!(range.lower(), &LowerBound::Unbounded);
        assert_eq!(range.upper(), &UpperBound::Inclusive(Value::Int(7)));

        let point = parse_interval("3", ValueType::Int).expect("valid interval");
        assert!(point.contains(&Value::Int(3)));
        assert!(!point.contains(&Value::Int(4)));
    }

    #[test]
    fn rejects_malformed_intervals() {
        assert!(parse_interval("[1 2]", ValueType::Int).is_err());
        assert!(parse_interval("[9,1]", ValueType::Int).is_err());
        assert!(parse_interval("[a,b]", ValueType::Int).is_err());
    }
}
