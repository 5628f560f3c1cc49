use std::fmt;
use std::time::Duration;
use url::Url;

use super::envelope;
use super::resource::ensure_positive_id;
use super::signer::{Credentials, Signer};
use super::transport::{default_headers, HttpBackend, Transport, UreqBackend, DEFAULT_TIMEOUT};
use crate::error::{Annotate, ApiError, Result};

/// Path segment every API route lives under
pub const API_SEGMENT: &str = "api";

/// Force a secure scheme and append the API segment to the host's path.
pub fn normalize_host(host: &str) -> Result<String> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ApiError::validation("API host cannot be empty"));
    }

    let mut url = if host.contains("://") {
        Url::parse(host)?
    } else {
        Url::parse(&format!("https://{}", host))?
    };

    url.set_scheme("https")
        .map_err(|_| ApiError::validation(format!("Cannot use a secure scheme for host '{}'", host)))?;

    let path = format!("{}/{}", url.path().trim_end_matches('/'), API_SEGMENT);
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// CloudBackup API client. Holds only immutable credentials, the
/// normalized endpoint and the HTTP backend.
#[derive(Clone)]
pub struct Client<B = UreqBackend> {
    endpoint: String,
    transport: Transport<B>,
}

impl Client<UreqBackend> {
    pub fn new(host: &str, access_key: &str, secret_key: &str) -> Result<Self> {
        Self::with_timeout(host, access_key, secret_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        host: &str,
        access_key: &str,
        secret_key: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let credentials = Credentials::new(access_key, secret_key)?;
        Self::with_backend(host, credentials, UreqBackend::new(timeout))
    }
}

impl<B: HttpBackend> Client<B> {
    pub fn with_backend(host: &str, credentials: Credentials, backend: B) -> Result<Self> {
        let endpoint = normalize_host(host)?;
        let transport = Transport::new(Signer::new(credentials), backend);

        Ok(Self {
            endpoint,
            transport,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &Transport<B> {
        &self.transport
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Install script for a server, as raw bytes.
    pub fn server_install(&self, id: i64) -> Result<Vec<u8>> {
        ensure_positive_id("server", id)?;

        self.transport
            .get(&self.url(&format!("/servers/{}/install", id)), &default_headers())
            .and_then(envelope::parse_bytes)
            .annotate(format!("while fetching install script for server {}", id))
    }

    /// Backup encryption keys, as the raw JSON document.
    pub fn backup_keys(&self) -> Result<Vec<u8>> {
        self.transport
            .get(&self.url("/backups/keys"), &default_headers())
            .and_then(envelope::parse_bytes)
            .annotate("while fetching backup keys")
    }
}

impl<B> fmt::Debug for Client<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
