//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("source unavailable: {context}")]
    SourceUnavailable {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid event: {0}")]
    InvalidEvent(String),
}

impl ApplicationError {
    /// Source failure without an underlying error value.
    pub fn unavailable(context: impl Into<String>, reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self::SourceUnavailable {
            context: context.into(),
            source: reason.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
