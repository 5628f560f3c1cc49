use std::fmt;
use thiserror::Error;

/// Coarse classification of an [`ApiError`], stable across context annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Classification,
    Transport,
    Io,
    Encode,
    Decode,
    Remote,
    ProtocolAnomaly,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Classification => "classification",
            ErrorKind::Transport => "transport",
            ErrorKind::Io => "io",
            ErrorKind::Encode => "encode",
            ErrorKind::Decode => "decode",
            ErrorKind::Remote => "remote",
            ErrorKind::ProtocolAnomaly => "protocol anomaly",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{kind} type '{input}' not recognized")]
    UnknownType { kind: &'static str, input: String },

    #[error("Invalid host URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to decode response body '{body}': {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("{message}")]
    Remote { message: String },

    #[error("{0}")]
    ProtocolAnomaly(String),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::UnknownType { .. } => ErrorKind::Classification,
            ApiError::InvalidUrl(_) => ErrorKind::Validation,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Io(_) => ErrorKind::Io,
            ApiError::Encode(_) => ErrorKind::Encode,
            ApiError::Decode { .. } => ErrorKind::Decode,
            ApiError::Remote { .. } => ErrorKind::Remote,
            ApiError::ProtocolAnomaly(_) => ErrorKind::ProtocolAnomaly,
            ApiError::Context { source, .. } => source.kind(),
        }
    }

    /// Message supplied by the remote service, if this is a remote failure.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ApiError::Remote { message } => Some(message),
            ApiError::Context { source, .. } => source.remote_message(),
            _ => None,
        }
    }

    pub fn annotate(self, context: impl Into<String>) -> Self {
        ApiError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Attach the operation that was running when an error surfaced.
pub trait Annotate<T> {
    fn annotate(self, context: impl Into<String>) -> Result<T>;
}

impl<T> Annotate<T> for Result<T> {
    fn annotate(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.annotate(context))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
