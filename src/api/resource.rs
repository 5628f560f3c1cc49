//! Generic create/get/update/delete engine shared by every resource kind.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::client::Client;
use super::envelope::{self, Envelope};
use super::transport::{default_headers, HttpBackend};
use crate::error::{Annotate, ApiError, Result};
use crate::models::Record;

/// Per-kind descriptor: where the kind lives and what a valid record is.
pub trait Resource: Record + Serialize + DeserializeOwned {
    /// Singular, human-facing name ("server")
    const KIND: &'static str;
    /// Collection path segment ("servers")
    const COLLECTION: &'static str;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Required-field checks run before any network call.
    fn validate(&self) -> Result<()>;

    fn collection_path() -> String {
        format!("/{}", Self::COLLECTION)
    }

    fn item_path(id: i64) -> String {
        format!("/{}/{}", Self::COLLECTION, id)
    }
}

pub(crate) fn ensure_positive_id(kind: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(ApiError::validation(format!("Invalid ID {} for {}", id, kind)));
    }
    Ok(())
}

impl<B: HttpBackend> Client<B> {
    /// Create a record remotely and return it with the assigned identifier.
    pub fn create<R: Resource>(&self, mut record: R) -> Result<R> {
        if record.id() != 0 {
            return Err(ApiError::validation(format!(
                "Cannot create {} that already has ID {}",
                R::KIND,
                record.id()
            )));
        }
        record.validate()?;

        let body = serde_json::to_vec(&record)?;
        let fields = self
            .transport()
            .post(&self.url(&R::collection_path()), body, &default_headers())
            .and_then(envelope::parse)
            .and_then(Envelope::into_result)
            .annotate(format!("while creating {}", R::KIND))?;

        match Envelope::assigned_id(&fields) {
            Some(id) if id > 0 => {
                record.set_id(id);
                tracing::debug!(kind = R::KIND, id, "Created record");
                Ok(record)
            }
            _ => Err(ApiError::ProtocolAnomaly(format!(
                "Missing ID from {} response {}",
                R::KIND,
                Value::Object(fields)
            ))),
        }
    }

    pub fn get<R: Resource>(&self, id: i64) -> Result<R> {
        ensure_positive_id(R::KIND, id)?;

        self.transport()
            .get(&self.url(&R::item_path(id)), &default_headers())
            .and_then(envelope::parse_record)
            .annotate(format!("while fetching {} {}", R::KIND, id))
    }

    /// Push the caller's copy of a persisted record. The record is not
    /// re-fetched; on success the caller's copy is authoritative.
    pub fn update<R: Resource>(&self, record: &R) -> Result<()> {
        ensure_positive_id(R::KIND, record.id())?;
        record.validate()?;

        let body = serde_json::to_vec(record)?;
        self.transport()
            .post(&self.url(&R::item_path(record.id())), body, &default_headers())
            .and_then(envelope::parse)
            .and_then(Envelope::into_result)
            .annotate(format!("while updating {} {}", R::KIND, record.id()))?;

        Ok(())
    }

    /// Delete a record. Deleting an id that no longer exists surfaces
    /// whatever the remote service answers.
    pub fn delete<R: Resource>(&self, id: i64) -> Result<()> {
        ensure_positive_id(R::KIND, id)?;

        self.transport()
            .delete(&self.url(&R::item_path(id)), &default_headers())
            .and_then(envelope::parse)
            .and_then(Envelope::into_result)
            .annotate(format!("while deleting {} {}", R::KIND, id))?;

        Ok(())
    }
}
