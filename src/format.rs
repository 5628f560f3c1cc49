use anyhow::Result;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use serde_json::Value;

use crate::config::OutputFormat;
use crate::models::Record;

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Two-column table of a record's (masked) fields.
pub fn record_table<R: Record>(record: &R) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["FIELD", "VALUE"]);

    for (label, value) in record.display_fields() {
        table.add_row(vec![label.to_string(), value]);
    }

    table
}

pub fn print_record<R: Record>(record: &R, output_format: OutputFormat) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&record.masked_json())?,
        OutputFormat::Table => println!("{}", record_table(record)),
    }
    Ok(())
}

/// Print a raw payload (install script, key dump) as text.
pub fn print_raw(bytes: &[u8]) {
    println!("{}", String::from_utf8_lossy(bytes));
}
