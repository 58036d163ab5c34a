use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a path. Unexpandable input is returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(expand_path(Path::new("/tmp/data")), PathBuf::from("/tmp/data"));
    }

    #[test]
    fn env_vars_are_expanded() {
        std::env::set_var("RSTREEMAP_EXPAND_TEST", "/data");
        assert_eq!(
            expand_path(Path::new("$RSTREEMAP_EXPAND_TEST/music")),
            PathBuf::from("/data/music")
        );
    }
}
