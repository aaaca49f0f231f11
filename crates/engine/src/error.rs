//! Errors the engine can return to its host.
//!
//! Request failures are not errors here: they travel as
//! [`RequestResult::Failed`] values. What remains is the plumbing around the
//! pipeline:
//!
//! - [`Client`] thrown when the HTTP client cannot be built.
//! - [`Io`] thrown when the displayed image file cannot be written.
//!
//!  [`RequestResult::Failed`]: crate::RequestResult::Failed
//!  [`Client`]: EngineError::Client
//!  [`Io`]: EngineError::Io
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("image file error: {0}")]
    Io(#[from] std::io::Error),
}
