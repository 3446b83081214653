//! CLI workflows. Each one resolves the project layout, drives the library
//! under a spinner and reports through the logger.

pub mod build;
pub mod check;
pub mod init;
pub mod install;
pub mod launch;
pub mod summary;

use crate::utils::config::{Config, PathOverrides, ProjectPaths};
use crate::utils::fs::get_cwd;
use crate::utils::path::find_project_root_from;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A project root together with its configuration and resolved layout.
#[derive(Debug, Clone)]
pub struct Project {
    pub config: Config,
    pub paths: ProjectPaths,
}

impl Project {
    /// Opens the project at `explicit`, or the nearest ancestor of the
    /// working directory that holds `badkit.toml` or `addon.yaml`.
    pub fn open(explicit: Option<&Path>, overrides: &PathOverrides) -> Result<Self> {
        let root = project_root(explicit)?;
        let config = Config::load_project(&root)
            .with_context(|| format!("Failed to load configuration in {}", root.display()))?;
        let paths = ProjectPaths::resolve(&root, &config, overrides);
        Ok(Project { config, paths })
    }
}

/// Root directory [`Project::open`] operates on.
pub fn project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = get_cwd().context("Failed to get current dir")?;
    Ok(match explicit {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => find_project_root_from(&cwd).unwrap_or(cwd),
    })
}

/// Directory `init` scaffolds into: `explicit`, or the working directory.
pub fn init_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = get_cwd().context("Failed to get current dir")?;
    Ok(explicit.map(|dir| cwd.join(dir)).unwrap_or(cwd))
}
