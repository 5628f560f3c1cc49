// CLI module - command groups and argument parsing
pub mod backup;
pub mod retention;
pub mod schedule;
pub mod server;
pub mod storage;


use anyhow::Result;

use crate::api::{Client, HttpBackend, Resource};
use crate::config::OutputFormat;
use crate::format;

/// Fetch one record and print it.
pub fn show<R: Resource, B: HttpBackend>(
    client: &Client<B>,
    id: i64,
    output_format: OutputFormat,
) -> Result<()> {
    let record = client.get::<R>(id)?;
    format::print_record(&record, output_format)
}

pub fn remove<R: Resource, B: HttpBackend>(client: &Client<B>, id: i64) -> Result<()> {
    client.delete::<R>(id)?;
    tracing::info!(kind = R::KIND, id, "Deleted record");
    eprintln!("✓ Deleted {} {}", R::KIND, id);
    Ok(())
}

/// Push an updated record and print the caller's copy.
pub fn push<R: Resource, B: HttpBackend>(
    client: &Client<B>,
    record: &R,
    output_format: OutputFormat,
) -> Result<()> {
    client.update(record)?;
    format::print_record(record, output_format)
}

pub fn created<R: Resource>(record: &R, output_format: OutputFormat) -> Result<()> {
    if output_format == OutputFormat::Table {
        eprintln!("✓ Created {} {}", R::KIND, record.id());
    }
    format::print_record(record, output_format)
}
