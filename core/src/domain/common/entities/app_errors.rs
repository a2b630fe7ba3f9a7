use thiserror::Error;

use crate::domain::{organization::validation::ValidationError, query::errors::QueryError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Query(#[from] QueryError),

    #[error("HTTP error! status: {status}, message: {message}")]
    Transport { status: u16, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    Connection(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CoreError {
    /// Local input errors are reported as warnings and never reached the backend.
    pub fn is_local(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::Query(_))
    }
}
