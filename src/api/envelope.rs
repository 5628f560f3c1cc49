//! Decoding of the `status` / `message` / `id` response envelope.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::transport::RawResponse;
use crate::error::{ApiError, Result};

pub const STATUS_KEY: &str = "status";
pub const MESSAGE_KEY: &str = "message";
pub const ID_KEY: &str = "id";
pub const STATUS_OK: &str = "ok";

/// Classified response. The untyped mapping never leaves this module
/// except inside `Success`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success(Map<String, Value>),
    Failure { message: String },
    Anomaly { reason: String },
}

impl Envelope {
    /// Classify a decoded JSON object by its `status` field.
    pub fn classify(fields: Map<String, Value>, body: &str) -> Self {
        match fields.get(STATUS_KEY) {
            Some(Value::String(status)) if status == STATUS_OK => Envelope::Success(fields),
            Some(Value::String(_)) => Envelope::Failure {
                message: message_of(&fields),
            },
            _ => Envelope::Anomaly {
                reason: format!("Unexpected response {}", body),
            },
        }
    }

    pub fn into_result(self) -> Result<Map<String, Value>> {
        match self {
            Envelope::Success(fields) => Ok(fields),
            Envelope::Failure { message } => Err(ApiError::Remote { message }),
            Envelope::Anomaly { reason } => Err(ApiError::ProtocolAnomaly(reason)),
        }
    }

    /// Identifier assigned by the remote service, when it is numeric.
    pub fn assigned_id(fields: &Map<String, Value>) -> Option<i64> {
        match fields.get(ID_KEY)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }
}

fn message_of(fields: &Map<String, Value>) -> String {
    match fields.get(MESSAGE_KEY) {
        Some(Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => "remote service reported a failure without a message".to_string(),
    }
}

fn decode_object(body: &[u8]) -> Result<Map<String, Value>> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        source,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

/// Error for a non-2xx response: the conventional error envelope if the
/// body carries one, otherwise an anomaly naming the status and raw body.
pub fn failure(status: u16, body: &[u8]) -> ApiError {
    let text = String::from_utf8_lossy(body);

    let envelope = serde_json::from_slice::<Map<String, Value>>(body)
        .map(|fields| Envelope::classify(fields, &text));

    match envelope {
        Ok(Envelope::Failure { message }) => ApiError::Remote { message },
        _ => ApiError::ProtocolAnomaly(format!(
            "Server returned HTTP {} but there is no error in response '{}'",
            status, text
        )),
    }
}

/// Parse and classify an acknowledgement-style response.
pub fn parse(response: RawResponse) -> Result<Envelope> {
    let (status, body) = response.read_body()?;

    if !(200..300).contains(&status) {
        return Ok(match failure(status, &body) {
            ApiError::Remote { message } => Envelope::Failure { message },
            other => Envelope::Anomaly {
                reason: other.to_string(),
            },
        });
    }

    let fields = decode_object(&body)?;
    Ok(Envelope::classify(fields, &String::from_utf8_lossy(&body)))
}

/// Parse a read response straight into a typed record.
pub fn parse_record<T: DeserializeOwned>(response: RawResponse) -> Result<T> {
    let (status, body) = response.read_body()?;

    if !(200..300).contains(&status) {
        return Err(failure(status, &body));
    }

    serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
        source,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Return the raw body of a successful response (scripts, key dumps).
pub fn parse_bytes(response: RawResponse) -> Result<Vec<u8>> {
    let (status, body) = response.read_body()?;

    if !(200..300).contains(&status) {
        return Err(failure(status, &body));
    }

    Ok(body)
}
