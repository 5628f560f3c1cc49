//! Request signing for the CloudBackup API.
//!
//! The canonical message is built from the request metadata, each part
//! followed by a newline:
//! 1. HTTP method
//! 2. URL, exactly as sent
//! 3. Timestamp (`%Y-%m-%dT%H:%M:%S%z`, UTC)
//! 4. Access key
//! 5. Hex MD5 of the body bytes (only when a body is present, and without
//!    a trailing newline)
//!
//! The signature is base64(HMAC-SHA256(secret_key, message)) and travels in
//! the `Authorization` header as `BL <signature>`.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;
use std::fmt;

use super::transport::Request;
use crate::error::{ApiError, Result};
use crate::models::mask_secret;

type HmacSha256 = Hmac<Sha256>;

pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";
pub const DATE_HEADER: &str = "date";
pub const ACCESS_KEY_HEADER: &str = "bl-access-key";
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const MESSAGE_HEADER: &str = "bl-msg";
pub const AUTH_SCHEME: &str = "BL";

/// API key pair. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();

        if access_key.is_empty() {
            return Err(ApiError::validation("API access key cannot be empty"));
        }
        if secret_key.is_empty() {
            return Err(ApiError::validation("API secret key cannot be empty"));
        }

        Ok(Self {
            access_key,
            secret_key,
        })
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &mask_secret(&self.secret_key))
            .finish()
    }
}

/// Result of signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub date: String,
    pub message: String,
    pub value: String,
}

impl Signature {
    pub fn authorization(&self) -> String {
        format!("{} {}", AUTH_SCHEME, self.value)
    }

    /// Canonical message with newlines escaped, safe to carry in a header.
    pub fn audit_message(&self) -> String {
        self.message.replace('\n', "\\n")
    }
}

#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn access_key(&self) -> &str {
        self.credentials.access_key()
    }

    pub fn format_date(at: DateTime<Utc>) -> String {
        at.format(DATE_FORMAT).to_string()
    }

    pub fn body_digest(body: &[u8]) -> String {
        hex::encode(Md5::digest(body))
    }

    pub fn canonical_message(
        method: &str,
        url: &str,
        date: &str,
        access_key: &str,
        body: Option<&[u8]>,
    ) -> String {
        let mut message = String::with_capacity(method.len() + url.len() + date.len() + 64);
        for part in [method, url, date, access_key] {
            message.push_str(part);
            message.push('\n');
        }
        if let Some(body) = body {
            message.push_str(&Self::body_digest(body));
        }
        message
    }

    /// Compute the signature for a request without touching it.
    pub fn signature(
        &self,
        method: &str,
        url: &str,
        at: DateTime<Utc>,
        body: Option<&[u8]>,
    ) -> Result<Signature> {
        let date = Self::format_date(at);
        let message =
            Self::canonical_message(method, url, &date, self.credentials.access_key(), body);

        let mut mac = HmacSha256::new_from_slice(self.credentials.secret_key.as_bytes())
            .map_err(|e| ApiError::validation(format!("Invalid API secret key: {}", e)))?;
        mac.update(message.as_bytes());
        let value = BASE64.encode(mac.finalize().into_bytes());

        Ok(Signature {
            date,
            message,
            value,
        })
    }

    /// Sign the request in place, adding the date, access key, authorization
    /// and audit headers. The body is only borrowed, so the bytes that get
    /// transmitted are exactly the ones that were digested.
    pub fn sign(&self, request: &mut Request, at: DateTime<Utc>) -> Result<Signature> {
        let signature = self.signature(
            request.method.as_str(),
            &request.url,
            at,
            request.body.as_deref(),
        )?;

        request.add_header(DATE_HEADER, signature.date.clone());
        request.add_header(ACCESS_KEY_HEADER, self.credentials.access_key().to_string());
        request.add_header(AUTHORIZATION_HEADER, signature.authorization());
        request.add_header(MESSAGE_HEADER, signature.audit_message());

        Ok(signature)
    }
}
