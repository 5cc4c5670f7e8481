//! Remote client and codec error types.

use crate::model::validation::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// JSON mapping failure for one value or batch.
#[derive(Debug)]
pub enum CodecError {
    /// Body or element does not match the wire shape.
    Json(serde_json::Error),
    /// Decoded value violates a model invariant (including unknown roles).
    Invalid(ModelValidationError),
    /// Batch body is not a JSON array.
    NotAnArray,
    /// Create response does not carry a positive id under any accepted key.
    MissingId(&'static str),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed json: {err}"),
            Self::Invalid(err) => write!(f, "invalid value: {err}"),
            Self::NotAnArray => f.write_str("expected a json array"),
            Self::MissingId(key) => write!(f, "response carries no `{key}`"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(err) => Some(err),
            Self::NotAnArray | Self::MissingId(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ModelValidationError> for CodecError {
    fn from(value: ModelValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Failure of one remote operation.
#[derive(Debug)]
pub enum RemoteError {
    /// Input rejected before any request was sent.
    InvalidArgument(ModelValidationError),
    /// Connection, timeout or client construction failure.
    Transport(reqwest::Error),
    /// Server answered with a non-2xx status.
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },
    /// Response body could not be mapped to domain values.
    Decode(CodecError),
}

impl RemoteError {
    /// HTTP status when the server answered with a non-2xx code.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Status {
                method,
                path,
                status,
            } => write!(f, "{method} {path} returned status {status}"),
            Self::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl Error for RemoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Status { .. } => None,
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<CodecError> for RemoteError {
    fn from(value: CodecError) -> Self {
        Self::Decode(value)
    }
}

impl From<ModelValidationError> for RemoteError {
    fn from(value: ModelValidationError) -> Self {
        Self::InvalidArgument(value)
    }
}
