use crate::config::SheetConfig;
use crate::dynamic::{records_from_json, records_to_json};
use crate::error::{SheetMapError, SheetMapResult};
use crate::mapping::{resolve, ColumnLayout, SheetExporter, SheetImporter};
use crate::types::Row;
use crate::workbook::{read_workbook_file, ExportArtifact};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Widest cell shown by `inspect` before truncating
const INSPECT_CELL_WIDTH: usize = 24;

/// Execute the columns command
pub fn columns(schema: PathBuf) -> SheetMapResult<()> {
    let config = SheetConfig::load(&schema)?;
    let record_schema = config.schema()?;
    let specs = resolve(&record_schema);

    println!("{}", "📋 SheetMap - Export Columns".bold().green());
    println!("   Schema: {}", schema.display());
    println!("   Sheet:  {}\n", config.sheet_name.bright_blue());

    if specs.is_empty() {
        println!("{}", "⚠️  No exportable fields (add a 'title' to export a field)".yellow());
        return Ok(());
    }

    for (idx, spec) in specs.iter().enumerate() {
        println!(
            "   {:>3}. {} ← {} (order {})",
            idx + 1,
            spec.title.bold(),
            spec.field_name.cyan(),
            spec.order
        );
    }

    let hidden: Vec<&str> = record_schema
        .fields()
        .iter()
        .filter(|f| f.export_meta().is_none())
        .map(|f| f.name())
        .collect();
    if !hidden.is_empty() {
        println!("\n   Not exported: {}", hidden.join(", ").dimmed());
    }
    println!();

    Ok(())
}

/// Execute the export command
pub fn export(schema: PathBuf, input: PathBuf, output: PathBuf, verbose: bool) -> SheetMapResult<()> {
    println!("{}", "📤 SheetMap - Excel Export".bold().green());
    println!("   Schema: {}", schema.display());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    let config = SheetConfig::load(&schema)?;

    if verbose {
        println!("{}", "📖 Reading records...".cyan());
    }

    let artifact = export_records_file(&config, &input)?;

    if verbose {
        println!("{}", "📊 Writing workbook...".cyan());
    }

    fs::write(&output, &artifact.bytes)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {} ({} bytes)\n", output.display(), artifact.bytes.len());

    Ok(())
}

/// Execute the import command
pub fn import(
    schema: PathBuf,
    input: PathBuf,
    output: PathBuf,
    layout: ColumnLayout,
    verbose: bool,
) -> SheetMapResult<()> {
    println!("{}", "📥 SheetMap - Excel Import".bold().green());
    println!("   Schema: {}", schema.display());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    let config = SheetConfig::load(&schema)?;

    if verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
        println!("   Column layout: {:?}\n", layout);
    }

    let records = import_workbook_file(&config, &input, layout)?;
    let count = records.as_array().map(Vec::len).unwrap_or(0);

    if verbose {
        println!("   Found {} records", count);
        println!("{}", "💾 Writing records...".cyan());
    }

    fs::write(&output, render_records(&records, &output)?)?;

    println!("{}", "✅ Import Complete!".bold().green());
    println!("   Records: {} → {}\n", count, output.display());

    Ok(())
}

/// Execute the inspect command
pub fn inspect(input: PathBuf, limit: Option<usize>) -> SheetMapResult<()> {
    let rows = read_workbook_file(&input)?;

    println!("{}", "🔍 SheetMap - Inspect".bold().green());
    println!("   File: {}", input.display());
    println!("   Rows: {}\n", rows.len());

    let shown = limit.unwrap_or(rows.len()).min(rows.len());
    for (idx, row) in rows.iter().take(shown).enumerate() {
        let line = format_row(row);
        if idx == 0 {
            println!("   {:>4} │ {}", idx, line.bold());
        } else {
            println!("   {:>4} │ {}", idx, line);
        }
    }
    if shown < rows.len() {
        println!("   {}", format!("… {} more rows", rows.len() - shown).dimmed());
    }
    println!();

    Ok(())
}

/// Load a YAML/JSON list of records and export it with the configured layout
pub fn export_records_file(config: &SheetConfig, input: &Path) -> SheetMapResult<ExportArtifact> {
    let content = fs::read_to_string(input)?;
    let value: Value = serde_yaml::from_str(&content)?;
    export_records(config, &value)
}

/// Export a JSON list of records with the configured layout
pub fn export_records(config: &SheetConfig, records: &Value) -> SheetMapResult<ExportArtifact> {
    let schema = config.schema()?;
    let records = records_from_json(&schema, records)?;
    SheetExporter::new(&schema)
        .with_options(config.export_options())
        .export_artifact(&records)
}

/// Import a workbook file into a JSON list of records
pub fn import_workbook_file(
    config: &SheetConfig,
    input: &Path,
    layout: ColumnLayout,
) -> SheetMapResult<Value> {
    let rows = read_workbook_file(input)?;
    import_rows(config, &rows, layout)
}

/// Import already-read rows into a JSON list of records
pub fn import_rows(config: &SheetConfig, rows: &[Row], layout: ColumnLayout) -> SheetMapResult<Value> {
    let schema = config.schema()?;
    let records = SheetImporter::new(&schema).with_layout(layout).import(rows)?;
    Ok(records_to_json(&schema, &records))
}

/// JSON for `.json` outputs, YAML otherwise
fn render_records(records: &Value, output: &Path) -> SheetMapResult<String> {
    let is_json = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::to_string_pretty(records).map_err(SheetMapError::Json)
    } else {
        serde_yaml::to_string(records).map_err(SheetMapError::Yaml)
    }
}

fn format_row(row: &Row) -> String {
    row.iter()
        .map(|cell| truncate_cell(cell))
        .collect::<Vec<_>>()
        .join(" │ ")
}

fn truncate_cell(cell: &str) -> String {
    if cell.chars().count() <= INSPECT_CELL_WIDTH {
        cell.to_string()
    } else {
        let head: String = cell.chars().take(INSPECT_CELL_WIDTH - 1).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
