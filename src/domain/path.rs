//! Display-path formatting for the two tree domains.

use std::fmt;

/// Renders a root-to-node label chain as one string, and recovers a node's
/// own label from such a string.
pub trait PathFormatter: fmt::Debug + Send + Sync {
    fn separator(&self) -> &str;

    fn format(&self, labels: &[&str]) -> String {
        labels.join(self.separator())
    }

    /// Last component of `identifier`; the identifier itself if it has no separator.
    fn base_name<'a>(&self, identifier: &'a str) -> &'a str {
        identifier
            .rsplit(self.separator())
            .next()
            .unwrap_or(identifier)
    }
}

/// Filesystem trees: OS-native separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemPaths;

impl PathFormatter for FileSystemPaths {
    fn separator(&self) -> &str {
        std::path::MAIN_SEPARATOR_STR
    }
}

/// Dataset trees: backslash-separated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetPaths;

impl PathFormatter for DatasetPaths {
    fn separator(&self) -> &str {
        "\\"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_paths_use_backslash() {
        let paths = DatasetPaths;
        assert_eq!(
            paths.format(&["World", "East Asia & Pacific", "China"]),
            "World\\East Asia & Pacific\\China"
        );
        assert_eq!(paths.base_name("World\\East Asia & Pacific\\China"), "China");
        assert_eq!(paths.base_name("China"), "China");
    }

    #[test]
    fn filesystem_base_name_strips_ancestors() {
        let paths = FileSystemPaths;
        let full = paths.format(&["music", "jazz", "so_what.mp3"]);
        assert_eq!(paths.base_name(&full), "so_what.mp3");
    }
}
