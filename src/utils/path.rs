use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "addon.yaml";
pub const CONFIG_FILE: &str = "badkit.toml";
pub const SRC_DIR: &str = "src";
pub const BUILD_DIR: &str = "build";
pub const BLEND_DIR: &str = "blend";
pub const VENDOR_DIR: &str = "vendor";
/// Scratch directory inside the build directory for generated scripts.
pub const SCRATCH_DIR: &str = ".badkit";

/// Returns true if the given directory looks like a badkit project root.
/// `badkit.toml` wins, but a bare `addon.yaml` is enough.
pub fn is_project_root(dir: &Path) -> bool {
    dir.join(CONFIG_FILE).is_file() || dir.join(MANIFEST_FILE).is_file()
}

/// Walks upward from `start` to locate the first directory considered a project root.
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|ancestor| is_project_root(ancestor))
        .map(Path::to_path_buf)
}

/// Joins `path` onto `root` unless it is already absolute.
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_root_from_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();
        let nested = dir.path().join("src").join("unit");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_project_root_from(&nested).as_deref(),
            Some(dir.path())
        );
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let root = Path::new("/project");
        assert_eq!(
            resolve_against(root, Path::new("src")),
            PathBuf::from("/project/src")
        );
        assert_eq!(
            resolve_against(root, Path::new("/elsewhere/src")),
            PathBuf::from("/elsewhere/src")
        );
    }
}
