//! Filesystem source
//!
//! Mirrors a directory: folders become internal nodes, everything else a
//! leaf sized by its length in bytes.

use std::path::{Path, PathBuf};

use generational_arena::Index;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::application::services::TreeSource;
use crate::application::{ApplicationError, ApplicationResult, SourceResultExt};
use crate::domain::{ColorSource, FileSystemPaths, TreeArena, TreeBuilder};
use crate::util::path::expand_path;

/// Tree source backed by a file or directory.
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    root: PathBuf,
}

impl FileSystemSource {
    /// `~` and `$VAR` in `path` are expanded.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            root: expand_path(path.as_ref()),
        }
    }
}

/// Final path component, or the whole path for roots like `/`.
fn root_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl TreeSource for FileSystemSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    #[instrument(level = "debug", skip(self, colors), fields(root = %self.root.display()))]
    fn load(&self, colors: Box<dyn ColorSource>) -> ApplicationResult<TreeArena> {
        let root = std::fs::canonicalize(&self.root).with_path_context("resolve", &self.root)?;
        let mut builder = TreeBuilder::new(Box::new(FileSystemPaths), colors);

        // dirs[d] is the most recent directory seen at depth d
        let mut dirs: Vec<Index> = Vec::new();
        let mut entries = 0usize;

        for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
            let entry = entry.with_path_context("walk", &root)?;
            let depth = entry.depth();
            let is_dir = entry.file_type().is_dir();
            let size = if is_dir {
                0
            } else {
                entry
                    .metadata()
                    .with_path_context("read metadata", entry.path())?
                    .len()
            };

            let idx = if depth == 0 {
                builder.root(root_label(&root), size)?
            } else {
                let parent = dirs.get(depth - 1).copied().ok_or_else(|| {
                    ApplicationError::unavailable(
                        format!("walk {}", root.display()),
                        format!("no parent directory for {}", entry.path().display()),
                    )
                })?;
                let label = entry.file_name().to_string_lossy().into_owned();
                builder.child(parent, label, size)?
            };

            if is_dir {
                dirs.truncate(depth);
                dirs.push(idx);
            }
            entries += 1;
        }

        let tree = builder.finish();
        debug!("load: {} entries, total {} bytes", entries, tree.total());
        Ok(tree)
    }
}
