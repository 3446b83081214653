use crate::addon::init::scaffold::{ScaffoldPlan, scaffold_project};
use crate::utils::kebab_case::to_snake_case;
use crate::utils::logger::{LogLevel, Logger};
use crate::utils::spinner::run_step;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

pub const DEFAULT_NAME: &str = "My Addon";
pub const DEFAULT_AUTHOR: &str = "johndoe";
pub const DEFAULT_OPERATOR: &str = "my_operator";

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub name: Option<String>,
    pub author: Option<String>,
    pub operator: Option<String>,
    /// Take defaults for anything not given instead of prompting.
    pub yes: bool,
}

/// Fills in the plan from flags, prompting for whatever is missing unless
/// `--yes` was given.
pub fn resolve_plan(opts: &InitOptions) -> Result<ScaffoldPlan> {
    let ask = |given: &Option<String>, message: &str, default: &str| -> Result<String> {
        match given {
            Some(value) => Ok(value.clone()),
            None if opts.yes => Ok(default.to_string()),
            None => inquire::Text::new(message)
                .with_default(default)
                .prompt()
                .with_context(|| format!("Failed to prompt: {}", message)),
        }
    };

    let name = ask(&opts.name, "Enter the addon name:", DEFAULT_NAME)?;
    let author = ask(&opts.author, "Enter the addon author:", DEFAULT_AUTHOR)?;
    let operator = to_snake_case(&ask(
        &opts.operator,
        "Enter the first operator unit name:",
        DEFAULT_OPERATOR,
    )?);

    if name.trim().is_empty() {
        bail!("The addon name cannot be empty");
    }
    if operator.is_empty() {
        bail!("The operator unit name must contain letters or digits");
    }

    Ok(ScaffoldPlan {
        name: name.trim().to_string(),
        author,
        operator,
    })
}

pub fn prompt_init(root: &Path, opts: &InitOptions) -> Result<Vec<PathBuf>> {
    if !opts.yes {
        println!();
        println!("⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯");
        println!("BADKit Addon Scaffolder");
        println!("⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯⎯");
        println!();
    }

    let plan = resolve_plan(opts)?;

    let logger = Logger::new();
    logger.log_message(LogLevel::Info, &format!("Name: {}", plan.name));
    logger.log_message(LogLevel::Info, &format!("Author: {}", plan.author));
    logger.log_message(LogLevel::Info, &format!("Operator unit: {}", plan.operator));
    logger.log_message(LogLevel::Info, &format!("Location: {}", root.display()));

    if !opts.yes {
        let confirmed = inquire::Confirm::new("Are these details correct ?")
            .with_default(true)
            .prompt()
            .context("Failed to prompt for confirmation")?;
        if !confirmed {
            logger.log_message(LogLevel::Warning, "Aborting addon scaffolding.");
            bail!("aborted by user");
        }
    }

    let written = run_step(
        "Generating addon project...",
        |files: &Vec<PathBuf>| format!("Generated {} files", files.len()),
        || scaffold_project(root, &plan),
    )
    .with_context(|| format!("Failed to scaffold a project in {}", root.display()))?;

    let lines: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
    let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    logger.log_message_with_trace(LogLevel::Info, "Created", refs);
    Ok(written)
}
