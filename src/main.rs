use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lookup_index::{IndexSchema, SearchStructure, TableIndex};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lookup-index", about = "Compound-key lookup tables over exact, range and interval columns")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a table and print the payloads matching one key per column.
    Query {
        /// Column layout, e.g. `exact:text,lower_bound_equal:int,interval:int`.
        #[arg(long)]
        columns: IndexSchema,
        /// Tab-separated table: key cells followed by the payload.
        table: PathBuf,
        /// One lookup value per column.
        keys: Vec<String>,
    },
    /// Load a table and print row and payload counts.
    Stats {
        /// Column layout, e.g. `exact:text,lower_bound_equal:int,interval:int`.
        #[arg(long)]
        columns: IndexSchema,
        /// Tab-separated table: key cells followed by the payload.
        table: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            columns,
            table,
            keys,
        } => run_query(columns, &table, &keys)?,
        Commands::Stats { columns, table } => run_stats(columns, &table)?,
    }

    Ok(())
}

fn run_query(schema: IndexSchema, table_path: &Path, keys: &[String]) -> Result<()> {
    let index = load_table(schema, table_path)?;
    let cells: Vec<&str> = keys.iter().map(String::as_str).collect();
    let matches = index
        .query_cells(&cells)
        .with_context(|| format!("invalid query {:?}", keys))?;

    let mut payloads: Vec<String> = matches.into_iter().collect();
    payloads.sort();
    for payload in payloads {
        println!("{payload}");
    }

    Ok(())
}

fn run_stats(schema: IndexSchema, table_path: &Path) -> Result<()> {
    let index = load_table(schema, table_path)?;
    let payloads: HashSet<String> = index.results();

    println!("schema\t{}", index.schema());
    println!("rows\t{}", index.rows());
    println!("payloads\t{}", payloads.len());

    Ok(())
}

fn load_table(schema: IndexSchema, path: &Path) -> Result<TableIndex> {
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("failed to open table {}", path.display()))?,
    );
    let key_columns = schema.len();
    let mut index = TableIndex::new(schema);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split('\t').collect();
        let Some((payload, cells)) = fields.split_last() else {
            continue;
        };
        if cells.len() != key_columns {
            anyhow::bail!(
                "line {}: expected {} key columns plus a payload, found {} fields",
                line_no + 1,
                key_columns,
                fields.len()
            );
        }

        index
            .insert_cells(cells, payload.trim().to_string())
            .with_context(|| format!("invalid row on line {}", line_no + 1))?;
    }

    info!(rows = index.rows(), "loaded table");
    debug!(path = %path.display(), "table source");
    Ok(index)
}
