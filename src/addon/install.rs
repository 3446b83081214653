use crate::addon::Project;
use crate::errors::BadkitError;
use crate::utils::logger::{LogLevel, Logger};
use crate::utils::path::VENDOR_DIR;
use crate::utils::spinner::run_unit_step;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// `<src>/vendor/<pkg>`
pub fn vendor_dir(src_root: &Path, pkg: &str) -> PathBuf {
    src_root.join(VENDOR_DIR).join(pkg)
}

pub fn pip_args(pkg: &str, target: &Path) -> Vec<OsString> {
    vec![
        "install".into(),
        pkg.into(),
        "-t".into(),
        target.as_os_str().to_os_string(),
    ]
}

/// The pip executable: `flag` when given, otherwise `pip3` then `pip` on PATH.
pub fn locate_pip(flag: Option<&str>) -> Result<PathBuf, BadkitError> {
    let found = match flag {
        Some(exe) => which::which(exe),
        None => which::which("pip3").or_else(|_| which::which("pip")),
    };
    found.map_err(|e| {
        BadkitError::Process(format!(
            "Could not find {}: {}",
            flag.unwrap_or("pip3 or pip"),
            e
        ))
    })
}

/// Installs a distribution from the package index into the project's
/// vendor directory so it ships with the sources.
pub fn run_install(project: &Project, pkg: &str, pip: Option<&str>) -> Result<PathBuf> {
    let pip = locate_pip(pip)?;
    let target = vendor_dir(&project.paths.src, pkg);
    Logger::new().log_message(
        LogLevel::Debug,
        &format!("Running {} {:?}", pip.display(), pip_args(pkg, &target)),
    );

    run_unit_step(
        &format!("Installing {}...", pkg),
        &format!("Installed {} into {}", pkg, target.display()),
        || {
            let status = Command::new(&pip)
                .args(pip_args(pkg, &target))
                .status()
                .map_err(|e| BadkitError::Process(format!("Failed to run pip: {}", e)))?;
            if status.success() {
                Ok(())
            } else {
                Err(BadkitError::Process(format!("pip exited with {}", status)))
            }
        },
    )
    .with_context(|| format!("Failed to install {}", pkg))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_into_vendor_subdirectory() {
        let target = vendor_dir(Path::new("/p/src"), "numpy");
        assert_eq!(target, PathBuf::from("/p/src/vendor/numpy"));
        assert_eq!(
            pip_args("numpy", &target),
            vec!["install", "numpy", "-t", "/p/src/vendor/numpy"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }
}
