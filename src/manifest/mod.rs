//! Resolves an `addon.yaml` document into an [`Addon`].
//!
//! The document is read as a plain `serde_yaml::Value` and every custom tag is
//! mapped to a [`Descriptor`] by hand. Operator units are resolved against
//! their source files while parsing, so a manifest that parses is a manifest
//! whose sources conform.

pub mod node;

use crate::builder::panel::synthesize_panel;
use crate::errors::{BadkitError, Result};
use crate::source::{
    OperatorContract, PanelContract, PropertyGroupContract, module_path, resolve_class,
};
use crate::types::addon::{
    Addon, BlInfo, BlendUnit, OperatorUnit, PanelPlacement, PanelUnit, SupportTier,
};
use crate::utils::kebab_case::to_archive_name;
use crate::utils::logger::{LogLevel, Logger};
use serde_yaml::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub use node::{Descriptor, Fields, resolve};

/// Everything source lookups resolve against.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    pub src_root: PathBuf,
}

impl ResolveContext {
    pub fn new(src_root: impl Into<PathBuf>) -> Self {
        ResolveContext {
            src_root: src_root.into(),
        }
    }
}

/// Reads and resolves the manifest at `manifest_path`.
///
/// ### Parameters
/// - `manifest_path`: path to `addon.yaml`. Missing is a not-found error.
/// - `src_root`: directory holding the operator units and `blend/`.
pub fn load_manifest(manifest_path: &Path, src_root: &Path) -> Result<Addon> {
    if !manifest_path.is_file() {
        return Err(BadkitError::not_found("manifest", manifest_path));
    }
    let text = fs::read_to_string(manifest_path)?;
    Logger::new().log_message(
        LogLevel::Debug,
        &format!(
            "Resolving {} against {}",
            manifest_path.display(),
            src_root.display()
        ),
    );
    parse_manifest(&text, &ResolveContext::new(src_root))
}

pub fn parse_manifest(text: &str, ctx: &ResolveContext) -> Result<Addon> {
    let document: Value = serde_yaml::from_str(text)?;
    if document.is_null() {
        return Err(BadkitError::manifest("the manifest is empty"));
    }
    resolve::<Addon>(&document, ctx)
}

impl Descriptor for Addon {
    const TAG: &'static str = "Addon";
    const ATTRS: &'static [&'static str] = &["bl_info", "operators", "blend"];

    fn construct(fields: &mut Fields, ctx: &ResolveContext) -> Result<Self> {
        let bl_info = resolve::<BlInfo>(&fields.require("bl_info")?, ctx)?;

        let mut operators = Vec::new();
        let mut seen = HashSet::new();
        for node in fields.sequence("operators")? {
            let unit = resolve::<OperatorUnit>(&node, ctx)?;
            if !seen.insert(unit.name.clone()) {
                return Err(BadkitError::Configuration(format!(
                    "operator unit '{}' is listed more than once",
                    unit.name
                )));
            }
            operators.push(unit);
        }

        let blend = fields
            .sequence("blend")?
            .iter()
            .map(|node| resolve::<BlendUnit>(node, ctx))
            .collect::<Result<Vec<_>>>()?;

        Ok(Addon {
            bl_info,
            operators,
            blend,
        })
    }
}

impl Descriptor for BlInfo {
    const TAG: &'static str = "BLInfo";
    const ATTRS: &'static [&'static str] = &[
        "name",
        "description",
        "author",
        "addon_version",
        "blender_version",
        "warning",
        "doc_url",
        "tracker_url",
        "support",
    ];

    fn construct(fields: &mut Fields, _ctx: &ResolveContext) -> Result<Self> {
        let support = match fields.optional_str("support")? {
            Some(raw) => Some(SupportTier::parse(&raw).ok_or_else(|| {
                BadkitError::manifest(format!(
                    "unsupported support tier '{}' (expected OFFICIAL, COMMUNITY or TESTING)",
                    raw
                ))
            })?),
            None => None,
        };

        let name = fields.require_str("name")?;
        check_archive_name(&name)?;

        Ok(BlInfo {
            name,
            description: fields.optional_str("description")?,
            author: fields.optional_str("author")?,
            addon_version: fields.optional_version("addon_version")?,
            blender_version: fields.optional_version("blender_version")?,
            warning: fields.optional_str("warning")?,
            doc_url: fields.optional_str("doc_url")?,
            tracker_url: fields.optional_str("tracker_url")?,
            support,
        })
    }
}

impl Descriptor for PanelPlacement {
    const TAG: &'static str = "Panel";
    const ATTRS: &'static [&'static str] = &["space", "category", "space_type", "region_type"];

    fn construct(fields: &mut Fields, _ctx: &ResolveContext) -> Result<Self> {
        Ok(PanelPlacement {
            space: fields.require_str("space")?,
            category: fields.require_str("category")?,
            space_type: fields.optional_str("space_type")?,
            region_type: fields.optional_str("region_type")?,
        })
    }
}

/// The addon name becomes the bundle's file name, so its normalized form must
/// be a single non-empty path component.
fn check_archive_name(name: &str) -> Result<()> {
    let stem = to_archive_name(name);
    let reason = if stem.is_empty() {
        Some("is empty")
    } else if stem.contains(['/', '\\']) {
        Some("contains a path separator")
    } else if stem.contains("..") || stem.starts_with('.') {
        Some("starts with a dot or contains '..'")
    } else if stem.chars().any(|c| c.is_control() || matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|')) {
        Some("contains characters that are not valid in file names")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(BadkitError::manifest(format!(
            "addon name '{}' cannot name an archive: it {}",
            name, reason
        ))),
        None => Ok(()),
    }
}

impl Descriptor for BlendUnit {
    const TAG: &'static str = "Blend";
    const ATTRS: &'static [&'static str] = &["name", "node_groups"];

    fn construct(fields: &mut Fields, _ctx: &ResolveContext) -> Result<Self> {
        Ok(BlendUnit {
            name: fields.require_str("name")?,
            node_groups: fields.string_list("node_groups")?,
        })
    }
}

impl Descriptor for OperatorUnit {
    const TAG: &'static str = "Operator";
    const ATTRS: &'static [&'static str] = &["name", "panel"];

    fn construct(fields: &mut Fields, ctx: &ResolveContext) -> Result<Self> {
        let name = fields.require_str("name")?;
        if name.trim().is_empty() || name.contains(['/', '\\']) {
            return Err(BadkitError::manifest(format!(
                "operator unit name '{}' must be a plain directory name",
                name
            )));
        }
        let src = ctx.src_root.as_path();

        let operator = resolve_class::<OperatorContract>(src, &name, "operator")?;
        let properties = if module_path(src, &name, "properties").is_file() {
            Some(resolve_class::<PropertyGroupContract>(src, &name, "properties")?)
        } else {
            None
        };

        let panel = match fields.take("panel") {
            None => None,
            // A bare string names an explicit panel module inside the unit.
            Some(Value::String(module)) => {
                if properties.is_none() {
                    return Err(BadkitError::Configuration(format!(
                        "operator unit '{}' declares panel module '{}' but has no properties module",
                        name, module
                    )));
                }
                Some(PanelUnit::Module(resolve_class::<PanelContract>(
                    src, &name, &module,
                )?))
            }
            Some(node) => {
                let placement = resolve::<PanelPlacement>(&node, ctx)?;
                let spec = synthesize_panel(&name, &operator, properties.as_ref(), &placement)?;
                Some(PanelUnit::Generated(spec))
            }
        };

        Ok(OperatorUnit {
            name,
            operator,
            properties,
            panel,
        })
    }
}
