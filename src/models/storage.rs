use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::{narrow_code, mask_secret, normalize_name, write_fields, Record, TypeCode};
use crate::api::Resource;
use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TypeCode", into = "u8")]
pub enum StorageType {
    Local = 1,
    S3 = 2,
    Google = 5,
    DigitalOcean = 6,
    Alibaba = 7,
}

impl StorageType {
    pub fn name(&self) -> &'static str {
        match self {
            StorageType::Local => "Local Storage",
            StorageType::S3 => "AWS S3",
            StorageType::Google => "Google Cloud Storage",
            StorageType::DigitalOcean => "DigitalOcean Spaces",
            StorageType::Alibaba => "Alibaba Object Storage",
        }
    }

    /// Whether backups go to a cloud bucket rather than a local path.
    pub fn is_cloud(&self) -> bool {
        !matches!(self, StorageType::Local)
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StorageType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_name(s).as_str() {
            "local" | "localstorage" => Ok(StorageType::Local),
            "s3" | "awss3" => Ok(StorageType::S3),
            "google" | "googlecloudstorage" => Ok(StorageType::Google),
            "digitalocean" | "digitaloceanspaces" => Ok(StorageType::DigitalOcean),
            "alibaba" | "alibabaobjectstorage" => Ok(StorageType::Alibaba),
            _ => Err(ApiError::UnknownType {
                kind: "Storage",
                input: s.to_string(),
            }),
        }
    }
}

impl From<StorageType> for u8 {
    fn from(value: StorageType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for StorageType {
    type Error = ApiError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(StorageType::Local),
            2 => Ok(StorageType::S3),
            5 => Ok(StorageType::Google),
            6 => Ok(StorageType::DigitalOcean),
            7 => Ok(StorageType::Alibaba),
            _ => Err(ApiError::UnknownType {
                kind: "Storage",
                input: code.to_string(),
            }),
        }
    }
}

impl TryFrom<TypeCode> for StorageType {
    type Error = ApiError;

    fn try_from(code: TypeCode) -> Result<Self> {
        match code {
            TypeCode::Code(code) => Self::try_from(narrow_code("Storage", code)?),
            TypeCode::Name(name) => name.parse(),
        }
    }
}

/// Where backups are written. Local storages use `local_path`; cloud
/// storages use the bucket, key pair and region endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "storageType")]
    pub storage_type: StorageType,
    #[serde(rename = "localPath", default)]
    pub local_path: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(rename = "storage-access-key", default)]
    pub access_key: String,
    #[serde(rename = "storage-secret-key", default)]
    pub secret_key: String,
    #[serde(rename = "region-endpoint", default)]
    pub region_endpoint: String,
}

impl Storage {
    pub fn local(name: impl Into<String>, local_path: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            storage_type: StorageType::Local,
            local_path: local_path.into(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            region_endpoint: String::new(),
        }
    }

    pub fn cloud(
        name: impl Into<String>,
        storage_type: StorageType,
        bucket: impl Into<String>,
        region_endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            storage_type,
            local_path: String::new(),
            bucket: bucket.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region_endpoint: region_endpoint.into(),
        }
    }

    /// Per-type location checks.
    pub fn validate_params(&self) -> Result<()> {
        if !self.storage_type.is_cloud() {
            if self.local_path.trim().is_empty() {
                return Err(ApiError::validation("Local path cannot be empty"));
            }
            return Ok(());
        }

        let required = [
            (&self.bucket, "Storage bucket cannot be empty"),
            (&self.access_key, "Storage access key cannot be empty"),
            (&self.secret_key, "Storage secret key cannot be empty"),
            (&self.region_endpoint, "Storage region endpoint cannot be empty"),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                return Err(ApiError::validation(message));
            }
        }
        Ok(())
    }
}

impl Resource for Storage {
    const KIND: &'static str = "storage";
    const COLLECTION: &'static str = "storages";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("Storage name cannot be empty"));
        }
        self.validate_params()
    }
}

impl Record for Storage {
    fn display_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Storage Type", self.storage_type.to_string()),
        ];

        if self.storage_type.is_cloud() {
            fields.push(("Bucket", self.bucket.clone()));
            fields.push(("Region Endpoint", self.region_endpoint.clone()));
            fields.push(("Access Key", self.access_key.clone()));
            fields.push(("Secret Key", mask_secret(&self.secret_key)));
        } else {
            fields.push(("Path", self.local_path.clone()));
        }
        fields
    }

    fn masked_json(&self) -> Value {
        let mut masked = self.clone();
        masked.secret_key = mask_secret(&self.secret_key);
        serde_json::to_value(&masked).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, &self.display_fields())
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("storage_type", &self.storage_type)
            .field("local_path", &self.local_path)
            .field("bucket", &self.bucket)
            .field("access_key", &self.access_key)
            .field("secret_key", &mask_secret(&self.secret_key))
            .field("region_endpoint", &self.region_endpoint)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StorageChanges {
    pub name: Option<String>,
    pub storage_type: Option<StorageType>,
    pub local_path: Option<String>,
    pub bucket: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region_endpoint: Option<String>,
}

impl StorageChanges {
    /// Apply onto a fetched record. The storage type is fixed at creation,
    /// and location fields that do not apply to the type are ignored.
    pub fn apply(self, storage: &mut Storage) -> Result<()> {
        if let Some(storage_type) = self.storage_type {
            if storage_type != storage.storage_type {
                return Err(ApiError::validation(format!(
                    "Can't change storage type from {} to {}",
                    storage.storage_type, storage_type
                )));
            }
        }

        if let Some(name) = self.name {
            storage.name = name;
        }

        if storage.storage_type.is_cloud() {
            if let Some(bucket) = self.bucket {
                storage.bucket = bucket;
            }
            if let Some(access_key) = self.access_key {
                storage.access_key = access_key;
            }
            if let Some(secret_key) = self.secret_key {
                storage.secret_key = secret_key;
            }
            if let Some(region_endpoint) = self.region_endpoint {
                storage.region_endpoint = region_endpoint;
            }
        } else if let Some(local_path) = self.local_path {
            storage.local_path = local_path;
        }
        Ok(())
    }
}
