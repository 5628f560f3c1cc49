use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::{narrow_code, normalize_name, write_fields, Record, TypeCode};
use crate::api::Resource;
use crate::error::{ApiError, Result};

/// Read as a code or a name, always written by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TypeCode", into = "&'static str")]
pub enum RetentionType {
    ByDays = 1,
    ByCount = 2,
}

impl RetentionType {
    pub fn name(&self) -> &'static str {
        match self {
            RetentionType::ByDays => "By Days",
            RetentionType::ByCount => "By Count",
        }
    }
}

impl fmt::Display for RetentionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RetentionType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_name(s).as_str() {
            "bydays" | "by_days" | "days" => Ok(RetentionType::ByDays),
            "bycount" | "by_count" | "count" => Ok(RetentionType::ByCount),
            _ => Err(ApiError::UnknownType {
                kind: "Retention",
                input: s.to_string(),
            }),
        }
    }
}

impl From<RetentionType> for &'static str {
    fn from(value: RetentionType) -> Self {
        value.name()
    }
}

impl TryFrom<u8> for RetentionType {
    type Error = ApiError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(RetentionType::ByDays),
            2 => Ok(RetentionType::ByCount),
            _ => Err(ApiError::UnknownType {
                kind: "Retention",
                input: code.to_string(),
            }),
        }
    }
}

impl TryFrom<TypeCode> for RetentionType {
    type Error = ApiError;

    fn try_from(code: TypeCode) -> Result<Self> {
        match code {
            TypeCode::Code(code) => Self::try_from(narrow_code("Retention", code)?),
            TypeCode::Name(name) => name.parse(),
        }
    }
}

/// How long backups are kept: `count` days or `count` backups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retention {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "retentionType")]
    pub retention_type: RetentionType,
    pub count: i64,
}

impl Retention {
    pub fn new(name: impl Into<String>, retention_type: RetentionType, count: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            retention_type,
            count,
        }
    }
}

impl Resource for Retention {
    const KIND: &'static str = "retention";
    const COLLECTION: &'static str = "retentions";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("Retention name cannot be empty"));
        }
        if self.count <= 0 {
            return Err(ApiError::validation("Retention count cannot be <= 0"));
        }
        Ok(())
    }
}

impl Record for Retention {
    fn display_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Retention Type", self.retention_type.to_string()),
            ("Count", self.count.to_string()),
        ]
    }

    fn masked_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, &self.display_fields())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RetentionChanges {
    pub name: Option<String>,
    pub retention_type: Option<RetentionType>,
    pub count: Option<i64>,
}

impl RetentionChanges {
    pub fn apply(self, retention: &mut Retention) -> Result<()> {
        if let Some(name) = self.name {
            retention.name = name;
        }
        if let Some(retention_type) = self.retention_type {
            retention.retention_type = retention_type;
        }
        if let Some(count) = self.count {
            retention.count = count;
        }
        Ok(())
    }
}
