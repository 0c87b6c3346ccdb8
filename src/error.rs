//! Error types for Stepflow.
//!
//! All errors in Stepflow are represented by the `StepflowError` enum,
//! which provides specific variants for different error categories.
//!
//! Note that the converter itself never fails: malformed step data is
//! dropped field by field. Errors only surface from validation, storage,
//! configuration and the backend API.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Stepflow operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum StepflowError {
    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// A step failed property validation.
    #[error("{0}")]
    Step(String),

    /// Workflow definition errors.
    #[error("{0}")]
    Workflow(String),

    /// Node lookup or mutation errors.
    #[error("{0}")]
    Node(String),

    /// Edge definition errors.
    #[error("{0}")]
    Edge(String),

    /// Position store errors.
    #[error("{0}")]
    Store(String),

    /// Backend answered with a non-success status.
    #[error("api error, status: {status}, message: {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Transport level HTTP errors.
    #[error("{0}")]
    Http(String),

    /// Runtime errors (missing tokio runtime, task failures).
    #[error("{0}")]
    Runtime(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<StepflowError> for String {
    fn from(val: StepflowError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for StepflowError {
    fn from(error: std::io::Error) -> Self {
        StepflowError::IoError(error.to_string())
    }
}

impl From<StepflowError> for std::io::Error {
    fn from(val: StepflowError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for StepflowError {
    fn from(error: serde_json::Error) -> Self {
        StepflowError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for StepflowError {
    fn from(error: toml::de::Error) -> Self {
        StepflowError::Config(error.to_string())
    }
}

impl From<reqwest::Error> for StepflowError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => StepflowError::Api {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None => StepflowError::Http(error.to_string()),
        }
    }
}
