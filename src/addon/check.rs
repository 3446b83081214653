use crate::addon::Project;
use crate::manifest::load_manifest;
use crate::types::addon::Addon;
use crate::types::class::ClassSource;
use crate::utils::logger::{LogLevel, Logger};
use crate::utils::spinner::run_step;
use anyhow::{Context, Result};

/// Parses and resolves the manifest without writing anything, then lists
/// the classes the bundle would register.
pub fn run_check(project: &Project) -> Result<Addon> {
    let paths = &project.paths;
    let addon = run_step(
        "Checking manifest...",
        |addon: &Addon| format!("{} conforms", addon.bl_info.name),
        || load_manifest(&paths.manifest, &paths.src),
    )
    .with_context(|| format!("Failed to check {}", paths.manifest.display()))?;

    let logger = Logger::new();
    for unit in &addon.operators {
        let lines: Vec<String> = unit
            .classes()
            .iter()
            .map(|record| {
                let origin = match &record.source {
                    ClassSource::Module { module, class_name } => {
                        format!("{}.{}", module, class_name)
                    }
                    ClassSource::Generated { panel } => format!("generated {}", panel.class_name),
                };
                format!("{:<14} {:<36} {}", record.kind.as_str(), record.bl_idname, origin)
            })
            .collect();
        let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
        logger.log_message_with_trace(LogLevel::Info, &format!("Operator unit '{}'", unit.name), refs);
    }
    for blend in &addon.blend {
        logger.log_message(
            LogLevel::Info,
            &format!(
                "Blend data '{}' ({} node groups)",
                blend.name,
                blend.node_groups.len()
            ),
        );
    }

    Ok(addon)
}
