use badkit::{
    addon::{
        self, Project,
        init::prompt::{InitOptions, prompt_init},
        launch::LaunchOptions,
    },
    utils::{config::PathOverrides, signature::get_signature, version::get_version},
};
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io;

#[derive(Parser)]
#[command(name = "badkit")]
#[command(author = "NOIR Development Group")]
#[command(about = "Build, check and launch Blender addon bundles")]
struct Cli {
    /// Project directory (defaults to the nearest one containing addon.yaml)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the addon archive
    Build {
        #[arg(long)]
        /// Manifest file (default: addon.yaml)
        manifest: Option<PathBuf>,
        #[arg(long)]
        /// Source root (default: src)
        src: Option<PathBuf>,
        #[arg(short, long)]
        /// Output directory (default: build)
        output: Option<PathBuf>,
    },

    /// Resolve the manifest and list its classes without writing anything
    Check {
        #[arg(long)]
        /// Manifest file (default: addon.yaml)
        manifest: Option<PathBuf>,
        #[arg(long)]
        /// Source root (default: src)
        src: Option<PathBuf>,
    },

    /// Install a distribution package into src/vendor/<pkg>
    Install {
        /// Package name as understood by pip
        pkg: String,
        #[arg(long)]
        /// pip executable (default: pip3, then pip)
        pip: Option<String>,
    },

    /// Launch Blender with addons installed and enabled
    Launch {
        #[arg(long)]
        /// Blender executable
        blender: Option<String>,
        #[arg(long)]
        /// .blend file to open on launch
        file: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        /// Return as soon as Blender has started
        detach: bool,
        /// Addon archives. Leave empty to build and launch this project.
        addons: Vec<PathBuf>,
    },

    /// Scaffold a new addon project
    Init {
        #[arg(long)]
        /// Addon display name
        name: Option<String>,
        #[arg(long)]
        /// Addon author
        author: Option<String>,
        #[arg(long)]
        /// First operator unit
        operator: Option<String>,
        #[arg(short, long, default_value_t = false)]
        /// Accept defaults instead of prompting
        yes: bool,
    },
}

async fn blocking<T, F>(f: F) -> io::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| io::Error::other(format!("Join error: {}", e)))?
        .map_err(|e| io::Error::other(format!("{:#}", e)))
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let version = get_version();
    let signature = get_signature(&version);

    let version_static: &'static str = Box::leak(format!("v{}", version).into_boxed_str());
    let signature_static: &'static str = Box::leak(signature.into_boxed_str());

    let mut cmd = Cli::command();
    cmd = cmd.version(version_static).before_help(signature_static);

    let raw_args: Vec<String> = std::env::args().collect();
    if raw_args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", signature_static);
        return Ok(());
    }

    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let explicit = cli.project;

    match cli.command {
        Commands::Build {
            manifest,
            src,
            output,
        } => {
            let overrides = PathOverrides {
                manifest,
                src,
                build: output,
            };
            blocking(move || {
                let project = Project::open(explicit.as_deref(), &overrides)?;
                addon::build::run_build(&project).map(|_| ())
            })
            .await
        }

        Commands::Check { manifest, src } => {
            let overrides = PathOverrides {
                manifest,
                src,
                build: None,
            };
            blocking(move || {
                let project = Project::open(explicit.as_deref(), &overrides)?;
                addon::check::run_check(&project).map(|_| ())
            })
            .await
        }

        Commands::Install { pkg, pip } => {
            blocking(move || {
                let project = Project::open(explicit.as_deref(), &PathOverrides::default())?;
                addon::install::run_install(&project, &pkg, pip.as_deref()).map(|_| ())
            })
            .await
        }

        Commands::Launch {
            blender,
            file,
            detach,
            addons,
        } => {
            let opts = LaunchOptions {
                blender,
                file,
                detach,
                addons,
            };
            blocking(move || {
                let project = Project::open(explicit.as_deref(), &PathOverrides::default())?;
                addon::launch::run_launch(&project, opts)
            })
            .await
        }

        Commands::Init {
            name,
            author,
            operator,
            yes,
        } => {
            let opts = InitOptions {
                name,
                author,
                operator,
                yes,
            };
            let root = addon::init_root(explicit.as_deref())
                .map_err(|e| io::Error::other(format!("{:#}", e)))?;
            prompt_init(&root, &opts)
                .map(|_| ())
                .map_err(|e| io::Error::other(format!("{:#}", e)))
        }
    }
}
