//! Error conversion helpers for data acquisition
//!
//! Provides extension traits for cleaner error handling with path context.

use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting source errors to `ApplicationResult` with context.
pub trait SourceResultExt<T> {
    /// Add path context to a failed read.
    ///
    /// # Example
    /// ```ignore
    /// entry.metadata()
    ///     .with_path_context("read metadata", entry.path())?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Add free-form context, e.g. the URL being fetched.
    fn with_context(self, context: &str) -> ApplicationResult<T>;
}

impl<T, E> SourceResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::SourceUnavailable {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn with_context(self, context: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::SourceUnavailable {
            context: context.to_string(),
            source: Box::new(e),
        })
    }
}
