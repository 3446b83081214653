use crate::addon::Project;
use crate::addon::summary::print_artifact_summary;
use crate::builder::addon::{BuildOptions, BuildReport, build_addon};
use crate::utils::spinner::run_step;
use anyhow::{Context, Result};

/// Builds the project's archive and prints its summary.
pub fn run_build(project: &Project) -> Result<BuildReport> {
    let opts = BuildOptions::from(&project.paths);

    let report = run_step(
        "Building addon...",
        |report: &BuildReport| format!("Addon built: {}", report.archive.display()),
        || build_addon(&opts),
    )
    .with_context(|| format!("Failed to build {}", opts.manifest.display()))?;

    print_artifact_summary(&report).context("Failed to summarize the archive")?;
    Ok(report)
}
