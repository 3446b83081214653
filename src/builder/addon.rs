use crate::builder::archive::{ArchiveEntry, dedup_entries, write_archive};
use crate::errors::{BadkitError, Result};
use crate::manifest::load_manifest;
use crate::types::addon::{Addon, BlInfo, BlendUnit};
use crate::utils::config::ProjectPaths;
use crate::utils::fs as ufs;
use crate::utils::logger::{LogLevel, Logger};
use crate::utils::path::BLEND_DIR;
use crate::utils::version::get_version;
use std::fs;
use std::path::{Path, PathBuf};

/// Host-side bootstrap. The rendered `bl_info` header is prepended at build
/// time because the host reads it without importing the module.
pub const INIT_BODY: &str = include_str!("../../assets/addon_init.py");
pub const INIT_MEMBER: &str = "__init__.py";
pub const CLASSES_BLOB: &str = "classes.json";
pub const BLEND_BLOB: &str = "blend.json";

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub manifest: PathBuf,
    pub src_root: PathBuf,
    pub out_dir: PathBuf,
}

impl From<&ProjectPaths> for BuildOptions {
    fn from(paths: &ProjectPaths) -> Self {
        BuildOptions {
            manifest: paths.manifest.clone(),
            src_root: paths.src.clone(),
            out_dir: paths.build.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub addon_name: String,
    pub archive: PathBuf,
    pub members: Vec<String>,
}

/// Builds `<out>/<archive-name>.zip` from the manifest and its source units.
///
/// Nothing is written until the manifest has been fully resolved, so a
/// missing or non-conforming unit never leaves an archive behind.
///
/// ### Parameters
/// - `opts`: manifest path, source root and output directory.
pub fn build_addon(opts: &BuildOptions) -> Result<BuildReport> {
    let addon = load_manifest(&opts.manifest, &opts.src_root)?;
    let entries = plan_members(&addon, &opts.src_root)?;

    let out_zip = opts.out_dir.join(addon.bl_info.archive_file_name());
    if out_zip.exists() {
        fs::remove_file(&out_zip).map_err(|e| {
            BadkitError::Archive(format!(
                "Failed to remove previous archive {}: {}",
                out_zip.display(),
                e
            ))
        })?;
    }
    fs::create_dir_all(&opts.out_dir)?;

    write_archive(&out_zip, &entries)?;

    Logger::new().log_message(
        LogLevel::Debug,
        &format!("Wrote {} members to {}", entries.len(), out_zip.display()),
    );

    Ok(BuildReport {
        addon_name: addon.bl_info.name.clone(),
        archive: out_zip,
        members: entries.into_iter().map(|e| e.name).collect(),
    })
}

/// Plans every archive member in write order: bootstrap, unit sources,
/// auxiliary data, then the two JSON blobs.
pub fn plan_members(addon: &Addon, src_root: &Path) -> Result<Vec<ArchiveEntry>> {
    let mut entries = vec![ArchiveEntry::bytes(INIT_MEMBER, render_init(&addon.bl_info))];

    for unit in &addon.operators {
        for class in unit.source_modules() {
            entries.push(ArchiveEntry::file(
                class.archive_path.clone(),
                class.source_path.clone(),
            ));
        }
    }

    for blend in &addon.blend {
        entries.extend(blend_entries(blend, src_root)?);
    }

    entries.push(ArchiveEntry::bytes(
        CLASSES_BLOB,
        serde_json::to_vec_pretty(&addon.classes())?,
    ));
    entries.push(ArchiveEntry::bytes(
        BLEND_BLOB,
        serde_json::to_vec_pretty(&addon.blend)?,
    ));

    Ok(dedup_entries(entries))
}

/// Files of one auxiliary-data unit, named relative to the source root.
fn blend_entries(blend: &BlendUnit, src_root: &Path) -> Result<Vec<ArchiveEntry>> {
    let root = src_root.join(BLEND_DIR).join(&blend.name);
    let files = if root.is_dir() {
        ufs::walk_files(&root)?
    } else if root.is_file() {
        vec![root.clone()]
    } else {
        return Err(BadkitError::not_found(
            format!("blend data '{}'", blend.name),
            root,
        ));
    };

    Ok(files
        .into_iter()
        .map(|path| {
            let rel = ufs::path_relative_to(&path, src_root).unwrap_or_else(|| path.clone());
            ArchiveEntry::file(ufs::to_unix_string(rel), path)
        })
        .collect())
}

/// `__init__.py`: a generated header with `bl_info`, then the fixed body.
pub fn render_init(bl_info: &BlInfo) -> String {
    format!(
        "# Generated by BADKit {}. Do not edit.\n\n{}{}",
        get_version(),
        bl_info.to_python_dict(),
        INIT_BODY
    )
}
