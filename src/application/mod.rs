//! Application layer: tree sources and the interactive session
//!
//! This layer builds trees from the outside world and drives them in response
//! to user events. It depends on I/O boundary traits, never on concrete I/O.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::SourceResultExt;
