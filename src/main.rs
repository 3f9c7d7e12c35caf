use clap::{Parser, Subcommand};
use royalbit_sheetmap::cli;
use royalbit_sheetmap::error::SheetMapResult;
use royalbit_sheetmap::mapping::ColumnLayout;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetmap")]
#[command(about = "Declare columns once. Import and export any record type as Excel.")]
#[command(long_about = "SheetMap - Declarative record <-> spreadsheet mapping

A schema file names each field, its type, and (for exported fields) a column
title and order. Records are plain YAML/JSON lists of objects.

COMMANDS:
  columns - Show the export columns a schema resolves to
  export  - Records (YAML/JSON) to Excel (.xlsx)
  import  - Excel (.xls/.xlsx) to records (YAML/JSON)
  inspect - Print the raw rows of a workbook's first sheet

EXAMPLES:
  sheetmap columns people.schema.yaml
  sheetmap export people.schema.yaml people.yaml people.xlsx
  sheetmap import people.schema.yaml people.xlsx people.yaml --layout export
  sheetmap inspect people.xlsx --limit 10

Set RUST_LOG=royalbit_sheetmap=debug for mapping diagnostics.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the export columns a schema resolves to
    Columns {
        /// Path to the schema file (YAML)
        schema: PathBuf,
    },

    #[command(long_about = "Export records to Excel .xlsx format.

Writes one header row of column titles, then one row per record. Only fields
with a 'title' are exported, sorted by 'order' (ties keep declaration order).

EXAMPLE:
  sheetmap export people.schema.yaml people.yaml people.xlsx")]
    /// Export records to Excel .xlsx
    Export {
        /// Path to the schema file (YAML)
        schema: PathBuf,

        /// Records file: a YAML or JSON list of objects
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        output: PathBuf,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Import an Excel workbook into records.

Reads the first worksheet. Row 0 is the header and is skipped; every other
row becomes one record. Any unparseable cell aborts the whole import.

COLUMN LAYOUTS:
  declaration - column j feeds the j-th declared field (default)
  export      - column j feeds the j-th export column, so files written by
                'sheetmap export' import back unchanged

Output is JSON when the output path ends in .json, YAML otherwise.")]
    /// Import Excel (.xls/.xlsx) into records
    Import {
        /// Path to the schema file (YAML)
        schema: PathBuf,

        /// Input Excel file (.xls or .xlsx)
        input: PathBuf,

        /// Output records file (.yaml or .json)
        output: PathBuf,

        /// How columns are matched to fields
        #[arg(short, long, value_enum, default_value_t = ColumnLayout::Declaration)]
        layout: ColumnLayout,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the raw rows of a workbook's first sheet
    Inspect {
        /// Input Excel file (.xls or .xlsx)
        input: PathBuf,

        /// Show at most this many rows (header included)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn main() -> SheetMapResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Columns { schema } => cli::columns(schema),

        Commands::Export {
            schema,
            input,
            output,
            verbose,
        } => cli::export(schema, input, output, verbose),

        Commands::Import {
            schema,
            input,
            output,
            layout,
            verbose,
        } => cli::import(schema, input, output, layout, verbose),

        Commands::Inspect { input, limit } => cli::inspect(input, limit),
    }
}
