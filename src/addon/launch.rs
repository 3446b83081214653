use crate::addon::Project;
use crate::addon::build::run_build;
use crate::errors::BadkitError;
use crate::utils::config::{BLENDER_ENV, Config, resolve_blender};
use crate::utils::logger::{LogLevel, Logger};
use crate::utils::path::{SCRATCH_DIR, resolve_against};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Script run inside the host: installs and enables every addon passed
/// after `--`, then removes the installed copies on exit.
pub const BOOTLOADER: &str = include_str!("../../assets/bootloader.py");

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub blender: Option<String>,
    pub file: Option<PathBuf>,
    pub detach: bool,
    /// Archives to install. Empty means "build this project and use that".
    pub addons: Vec<PathBuf>,
}

/// Writes the bootloader to `<build>/.badkit/bootloader.py`.
pub fn write_bootloader(build_dir: &Path) -> std::io::Result<PathBuf> {
    let dir = build_dir.join(SCRATCH_DIR);
    fs::create_dir_all(&dir)?;
    let path = dir.join("bootloader.py");
    fs::write(&path, BOOTLOADER)?;
    Ok(path)
}

/// `[file] --python <bootloader> -- <addons...>`
pub fn launch_args(file: Option<&Path>, bootloader: &Path, addons: &[PathBuf]) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    if let Some(file) = file {
        args.push(file.as_os_str().to_os_string());
    }
    args.push("--python".into());
    args.push(bootloader.as_os_str().to_os_string());
    args.push("--".into());
    args.extend(addons.iter().map(|a| a.as_os_str().to_os_string()));
    args
}

/// Starts the host with the given addons installed and enabled.
pub fn run_launch(project: &Project, opts: LaunchOptions) -> Result<()> {
    let logger = Logger::new();
    let user = Config::load_user().context("Failed to load user configuration")?;
    let blender = resolve_blender(
        opts.blender.as_deref(),
        std::env::var(BLENDER_ENV).ok(),
        &project.config,
        &user,
    );
    let blender_exe = which::which(&blender).map_err(|e| {
        BadkitError::Process(format!("Could not find Blender executable '{}': {}", blender, e))
    })?;

    let addons = if opts.addons.is_empty() {
        vec![run_build(project)?.archive]
    } else {
        opts.addons
    };
    for addon in &addons {
        if !addon.is_file() {
            return Err(BadkitError::not_found("addon archive", addon).into());
        }
    }

    let file = opts.file.or_else(|| {
        project
            .config
            .launch
            .file
            .as_ref()
            .map(|f| resolve_against(&project.paths.root, f))
    });
    if let Some(f) = &file {
        if !f.is_file() {
            return Err(BadkitError::not_found("blend file", f).into());
        }
    }

    let bootloader = write_bootloader(&project.paths.build)
        .with_context(|| format!("Failed to write bootloader under {}", project.paths.build.display()))?;
    let args = launch_args(file.as_deref(), &bootloader, &addons);

    logger.log_message_with_trace(
        LogLevel::Info,
        &format!("Launching {}", blender_exe.display()),
        addons.iter().map(|a| a.to_str().unwrap_or("<non-utf8 path>")).collect(),
    );

    let mut command = Command::new(&blender_exe);
    command.args(&args);

    if opts.detach {
        let child = command
            .spawn()
            .map_err(|e| BadkitError::Process(format!("Failed to start Blender: {}", e)))?;
        logger.log_message(LogLevel::Success, &format!("Blender started (pid {})", child.id()));
        return Ok(());
    }

    let status = command
        .status()
        .map_err(|e| BadkitError::Process(format!("Failed to start Blender: {}", e)))?;
    if !status.success() {
        return Err(BadkitError::Process(format!("Blender exited with {}", status)).into());
    }
    logger.log_message(LogLevel::Success, "Blender session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_put_addons_after_separator() {
        let args = launch_args(
            Some(Path::new("scene.blend")),
            Path::new("build/.badkit/bootloader.py"),
            &[PathBuf::from("build/a.zip"), PathBuf::from("b.zip")],
        );
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "scene.blend",
                "--python",
                "build/.badkit/bootloader.py",
                "--",
                "build/a.zip",
                "b.zip"
            ]
        );
    }

    #[test]
    fn no_file_means_no_leading_argument() {
        let args = launch_args(None, Path::new("boot.py"), &[]);
        assert_eq!(args.first().map(|a| a.as_os_str()), Some(std::ffi::OsStr::new("--python")));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn bootloader_lands_in_scratch_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bootloader(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(".badkit").join("bootloader.py"));
        assert!(fs::read_to_string(path).unwrap().contains("addon_enable"));
    }
}
