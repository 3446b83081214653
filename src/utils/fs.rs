use crate::errors::{BadkitError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn get_cwd() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

pub fn get_user_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Lists every file below `root`, sorted so callers get a stable order.
pub fn walk_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(dir) = stack.pop() {
        let rd = fs::read_dir(&dir).map_err(|e| {
            BadkitError::Archive(format!("Failed to read directory {}: {}", dir.display(), e))
        })?;
        for entry in rd.flatten() {
            let p = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            // Linked files are bundled, linked directories are never followed.
            if file_type.is_symlink() {
                if p.is_file() {
                    files.push(p);
                }
                continue;
            }
            if file_type.is_dir() {
                if let Some(name) = p.file_name().and_then(|s| s.to_str()) {
                    if is_ignored_component(name) {
                        continue;
                    }
                }
                stack.push(p);
            } else if file_type.is_file() {
                files.push(p);
            }
        }
    }
    files.sort();
    Ok(files)
}

pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    let rel = path.strip_prefix(base).ok()?;
    Some(rel.to_path_buf())
}

pub fn to_unix_string<P: AsRef<Path>>(p: P) -> String {
    let s = p.as_ref().to_string_lossy().into_owned();
    s.replace('\\', "/")
}

pub fn is_ignored_component(name: &str) -> bool {
    matches!(name, "__pycache__" | ".git" | ".venv" | ".mypy_cache")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_files_is_sorted_and_skips_caches() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::create_dir_all(dir.path().join("__pycache__")).unwrap();
        fs::write(dir.path().join("b/two.txt"), "2").unwrap();
        fs::write(dir.path().join("a.txt"), "1").unwrap();
        fs::write(dir.path().join("__pycache__/x.pyc"), "").unwrap();

        let rel: Vec<String> = walk_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| to_unix_string(path_relative_to(p, dir.path()).unwrap()))
            .collect();
        assert_eq!(rel, vec!["a.txt", "b/two.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn walk_files_does_not_follow_linked_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tex")).unwrap();
        fs::write(dir.path().join("tex/noise.png"), "png").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("tex/loop")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("tex/noise.png"), dir.path().join("alias.png"))
            .unwrap();

        let rel: Vec<String> = walk_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| to_unix_string(path_relative_to(p, dir.path()).unwrap()))
            .collect();
        assert_eq!(rel, vec!["alias.png", "tex/noise.png"]);
    }
}
