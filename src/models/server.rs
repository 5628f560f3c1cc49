use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::{narrow_code, mask_secret, normalize_name, write_fields, Record, TypeCode};
use crate::api::Resource;
use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TypeCode", into = "u8")]
pub enum DatabaseType {
    MySql = 1,
    MongoDb = 2,
    PostgreSql = 3,
}

impl DatabaseType {
    pub fn name(&self) -> &'static str {
        match self {
            DatabaseType::MySql => "MySQL",
            DatabaseType::MongoDb => "MongoDB",
            DatabaseType::PostgreSql => "PostgreSQL",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatabaseType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_name(s).as_str() {
            "mysql" | "mariadb" | "percona_server" => Ok(DatabaseType::MySql),
            "mongodb" | "mongo" => Ok(DatabaseType::MongoDb),
            "postgresql" | "postgre_sql" | "postgre" | "postgres" => Ok(DatabaseType::PostgreSql),
            _ => Err(ApiError::UnknownType {
                kind: "Database",
                input: s.to_string(),
            }),
        }
    }
}

impl From<DatabaseType> for u8 {
    fn from(value: DatabaseType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for DatabaseType {
    type Error = ApiError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(DatabaseType::MySql),
            2 => Ok(DatabaseType::MongoDb),
            3 => Ok(DatabaseType::PostgreSql),
            _ => Err(ApiError::UnknownType {
                kind: "Database",
                input: code.to_string(),
            }),
        }
    }
}

impl TryFrom<TypeCode> for DatabaseType {
    type Error = ApiError;

    fn try_from(code: TypeCode) -> Result<Self> {
        match code {
            TypeCode::Code(code) => Self::try_from(narrow_code("Database", code)?),
            TypeCode::Name(name) => name.parse(),
        }
    }
}

/// A database host with a backup agent.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "dbTypeId")]
    pub db_type: DatabaseType,
    #[serde(default)]
    pub readonly: bool,
    #[serde(rename = "dbHost")]
    pub db_host: String,
    #[serde(rename = "dbPort")]
    pub db_port: String,
    #[serde(rename = "dbUser", default)]
    pub db_user: String,
    #[serde(rename = "dbPass", default)]
    pub db_pass: String,
}

impl Server {
    pub fn new(
        name: impl Into<String>,
        db_type: DatabaseType,
        readonly: bool,
        db_host: impl Into<String>,
        db_port: impl Into<String>,
        db_user: impl Into<String>,
        db_pass: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            db_type,
            readonly,
            db_host: db_host.into(),
            db_port: db_port.into(),
            db_user: db_user.into(),
            db_pass: db_pass.into(),
        }
    }
}

impl Resource for Server {
    const KIND: &'static str = "server";
    const COLLECTION: &'static str = "servers";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("Server name cannot be empty"));
        }
        if self.db_host.trim().is_empty() {
            return Err(ApiError::validation("Database host cannot be empty"));
        }
        if self.db_port.trim().is_empty() {
            return Err(ApiError::validation("Database port cannot be empty"));
        }
        Ok(())
    }
}

impl Record for Server {
    fn display_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("DB Type", self.db_type.to_string()),
            ("Readonly", self.readonly.to_string()),
            ("DB Host", self.db_host.clone()),
            ("DB Port", self.db_port.clone()),
            ("DB User", self.db_user.clone()),
            ("DB Pass", mask_secret(&self.db_pass)),
        ]
    }

    fn masked_json(&self) -> Value {
        let mut masked = self.clone();
        masked.db_pass = mask_secret(&self.db_pass);
        serde_json::to_value(&masked).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, &self.display_fields())
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("db_type", &self.db_type)
            .field("readonly", &self.readonly)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_pass", &mask_secret(&self.db_pass))
            .finish()
    }
}

/// Field changes requested for an existing server. Unset fields are kept.
#[derive(Debug, Clone, Default)]
pub struct ServerChanges {
    pub name: Option<String>,
    pub db_type: Option<DatabaseType>,
    pub readonly: Option<bool>,
    pub db_host: Option<String>,
    pub db_port: Option<String>,
    pub db_user: Option<String>,
    pub db_pass: Option<String>,
}

impl ServerChanges {
    /// Apply onto a fetched record. The database type is fixed at creation.
    pub fn apply(self, server: &mut Server) -> Result<()> {
        if let Some(db_type) = self.db_type {
            if db_type != server.db_type {
                return Err(ApiError::validation(format!(
                    "Can't change db-type from {} to {}",
                    server.db_type, db_type
                )));
            }
        }

        if let Some(name) = self.name {
            server.name = name;
        }
        if let Some(readonly) = self.readonly {
            server.readonly = readonly;
        }
        if let Some(db_host) = self.db_host {
            server.db_host = db_host;
        }
        if let Some(db_port) = self.db_port {
            server.db_port = db_port;
        }
        if let Some(db_user) = self.db_user {
            server.db_user = db_user;
        }
        if let Some(db_pass) = self.db_pass {
            server.db_pass = db_pass;
        }
        Ok(())
    }
}
