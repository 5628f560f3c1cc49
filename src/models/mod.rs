// Domain records managed through the API
pub mod retention;
pub mod schedule;
pub mod server;
pub mod storage;

pub use retention::{Retention, RetentionChanges, RetentionType};
pub use schedule::{Schedule, ScheduleChanges, ScheduleType};
pub use server::{DatabaseType, Server, ServerChanges};
pub use storage::{Storage, StorageChanges, StorageType};

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::error::ApiError;

const MASK: &str = "****";
const MASK_VISIBLE_CHARS: usize = 4;

/// Hide a secret, keeping only its last four characters when it is long
/// enough for that not to reveal it entirely.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= MASK_VISIBLE_CHARS {
        return MASK.to_string();
    }

    let tail: String = secret.chars().skip(count - MASK_VISIBLE_CHARS).collect();
    format!("{}{}", MASK, tail)
}

/// Human-facing rendering shared by all records. Secrets are always masked.
pub trait Record {
    /// Label/value pairs in display order.
    fn display_fields(&self) -> Vec<(&'static str, String)>;

    /// JSON rendering for display, with secrets masked.
    fn masked_json(&self) -> Value;
}

pub(crate) fn write_fields(
    f: &mut fmt::Formatter<'_>,
    fields: &[(&'static str, String)],
) -> fmt::Result {
    for (index, (label, value)) in fields.iter().enumerate() {
        if index > 0 {
            writeln!(f)?;
        }
        write!(f, "{}: {}", label, value)?;
    }
    Ok(())
}

/// Lowercase form with all whitespace removed, used to match type names.
pub(crate) fn normalize_name(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Type fields arrive as integer codes. Retention types are written by
/// name, so both forms are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeCode {
    Code(i64),
    Name(String),
}

/// Narrow a wire code to the one-byte range every type table uses.
pub(crate) fn narrow_code(kind: &'static str, code: i64) -> Result<u8, ApiError> {
    u8::try_from(code).map_err(|_| ApiError::UnknownType {
        kind,
        input: code.to_string(),
    })
}
