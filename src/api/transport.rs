use chrono::Utc;
use std::fmt;
use std::io::{Cursor, Read};
use std::time::Duration;

use super::signer::{Signer, MESSAGE_HEADER};
use crate::error::{ApiError, Result};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const CONTENT_TYPE_HEADER: &str = "Content-type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Headers applied to every JSON-bearing API call.
pub fn default_headers() -> Vec<(String, String)> {
    vec![(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string())]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound request. `body` holds the exact bytes that are both signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response as handed back by a backend; the body has not been read yet.
pub struct RawResponse {
    pub status: u16,
    body: Box<dyn Read + Send>,
}

impl RawResponse {
    pub fn new(status: u16, body: Box<dyn Read + Send>) -> Self {
        Self { status, body }
    }

    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, Box::new(Cursor::new(body.into())))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Drain the body stream completely.
    pub fn read_body(mut self) -> Result<(u16, Vec<u8>)> {
        let mut body = Vec::new();
        self.body.read_to_end(&mut body)?;
        Ok((self.status, body))
    }
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// The piece that actually puts a signed request on the wire.
pub trait HttpBackend {
    fn send(&self, request: &Request) -> Result<RawResponse>;
}

/// Blocking HTTP backend with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct UreqBackend {
    agent: ureq::Agent,
}

impl UreqBackend {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent }
    }
}

impl Default for UreqBackend {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl HttpBackend for UreqBackend {
    fn send(&self, request: &Request) -> Result<RawResponse> {
        let mut call = self.agent.request(request.method.as_str(), &request.url);
        for (name, value) in &request.headers {
            call = call.set(name, value);
        }

        let result = match &request.body {
            Some(body) => call.send_bytes(body),
            None => call.call(),
        };

        // Non-2xx responses still carry a body the envelope parser needs.
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => return Err(ApiError::Transport(err.to_string())),
        };

        let status = response.status();
        Ok(RawResponse::new(status, Box::new(response.into_reader())))
    }
}

/// Signs and executes API calls. Status codes and bodies are left to the
/// envelope parser.
#[derive(Debug, Clone)]
pub struct Transport<B = UreqBackend> {
    signer: Signer,
    backend: B,
}

impl<B: HttpBackend> Transport<B> {
    pub fn new(signer: Signer, backend: B) -> Self {
        Self { signer, backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn get(&self, url: &str, headers: &[(String, String)]) -> Result<RawResponse> {
        self.execute(Method::Get, url, None, headers)
    }

    pub fn delete(&self, url: &str, headers: &[(String, String)]) -> Result<RawResponse> {
        self.execute(Method::Delete, url, None, headers)
    }

    pub fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        headers: &[(String, String)],
    ) -> Result<RawResponse> {
        self.execute(Method::Post, url, Some(body), headers)
    }

    pub fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        headers: &[(String, String)],
    ) -> Result<RawResponse> {
        let mut request = Request::new(method, url, body);
        for (name, value) in headers {
            request.add_header(name.as_str(), value.as_str());
        }

        self.signer.sign(&mut request, Utc::now())?;

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            message = request.header(MESSAGE_HEADER).unwrap_or_default(),
            "Sending signed request"
        );

        let response = self.backend.send(&request)?;
        tracing::debug!(status = response.status, url = %request.url, "Received response");

        Ok(response)
    }
}
