use crate::errors::{BadkitError, Result};
use crate::utils::fs::get_user_home;
use crate::utils::path::{
    BUILD_DIR, CONFIG_FILE, MANIFEST_FILE, SRC_DIR, resolve_against,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the host executable for `launch`.
pub const BLENDER_ENV: &str = "BADKIT_BLENDER";
pub const DEFAULT_BLENDER: &str = "blender";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub manifest: Option<PathBuf>,
    pub src: Option<PathBuf>,
    pub build: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchSection {
    pub blender: Option<String>,
    pub file: Option<PathBuf>,
}

/// Contents of `badkit.toml` (project) or `~/.badkit/config.toml` (user).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectSection,
    pub launch: LaunchSection,
}

impl Config {
    /// Reads `path`, or returns defaults when the file does not exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Config::default());
        }
        let txt = fs::read_to_string(path)?;
        toml::from_str(&txt).map_err(|e| {
            BadkitError::Configuration(format!("Invalid TOML in {}: {}", path.display(), e))
        })
    }

    pub fn load_project(root: &Path) -> Result<Self> {
        Self::load_file(&root.join(CONFIG_FILE))
    }

    pub fn user_config_path() -> Option<PathBuf> {
        get_user_home().map(|home| home.join(".badkit").join("config.toml"))
    }

    pub fn load_user() -> Result<Self> {
        match Self::user_config_path() {
            Some(path) => Self::load_file(&path),
            None => Ok(Config::default()),
        }
    }
}

/// Command-line overrides for the project layout.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub manifest: Option<PathBuf>,
    pub src: Option<PathBuf>,
    pub build: Option<PathBuf>,
}

/// Absolute project layout after applying flags, `badkit.toml` and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub src: PathBuf,
    pub build: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(root: &Path, config: &Config, overrides: &PathOverrides) -> Self {
        let pick = |flag: &Option<PathBuf>, file: &Option<PathBuf>, default: &str| {
            let rel = flag
                .clone()
                .or_else(|| file.clone())
                .unwrap_or_else(|| PathBuf::from(default));
            resolve_against(root, &rel)
        };

        ProjectPaths {
            root: root.to_path_buf(),
            manifest: pick(&overrides.manifest, &config.project.manifest, MANIFEST_FILE),
            src: pick(&overrides.src, &config.project.src, SRC_DIR),
            build: pick(&overrides.build, &config.project.build, BUILD_DIR),
        }
    }
}

/// Flag > `BADKIT_BLENDER` > project file > user file > `blender`.
pub fn resolve_blender(
    flag: Option<&str>,
    env_value: Option<String>,
    project: &Config,
    user: &Config,
) -> String {
    flag.map(str::to_string)
        .or(env_value.filter(|v| !v.trim().is_empty()))
        .or_else(|| project.launch.blender.clone())
        .or_else(|| user.launch.blender.clone())
        .unwrap_or_else(|| DEFAULT_BLENDER.to_string())
}
