//! Application services
//!
//! Tree sources turn an outside data set into a `TreeArena`; the session
//! drives a built tree in response to user events. Sources depend on I/O
//! boundary traits (HttpClient) but are themselves concrete structs.

mod filesystem;
mod population;
mod session;

use std::path::PathBuf;

pub use filesystem::FileSystemSource;
pub use population::PopulationSource;
pub use session::{Selection, SessionEvent, SessionOutcome, TreemapSession};

use crate::application::ApplicationResult;
use crate::domain::{ColorSource, TreeArena};

/// Produces a fully-built tree, or nothing at all.
pub trait TreeSource {
    /// Human-readable origin, for logs and messages.
    fn describe(&self) -> String;

    fn load(&self, colors: Box<dyn ColorSource>) -> ApplicationResult<TreeArena>;
}

/// Which data set to map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    FileSystem(PathBuf),
    Population,
}
