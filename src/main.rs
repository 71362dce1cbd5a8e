//! Command-line interface for design-tokens.
//!
//! Usage:
//!   design-tokens build  [--config FILE] [--tokens DIR] [--out DIR] [--manifest FILE]
//!   design-tokens themes [--config FILE] [--manifest FILE]
//!   design-tokens split  [--config FILE] [--manifest FILE]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use design_tokens_core::{
    config::PROJECT_FILE, split::split_manifest, BuildPlan, Loader, ProjectConfig,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "design-tokens",
    version,
    about = "Build themed CSS custom-property stylesheets from design tokens"
)]
struct Cli {
    /// Log every file loaded and written
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write one stylesheet per token set
    Build(ConfigArgs),
    /// Print the passes a build would run
    Themes(ConfigArgs),
    /// Split a combined token manifest into per-set files
    Split(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// Configuration file (defaults to ./design-tokens.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the per-set token files
    #[arg(long)]
    tokens: Option<PathBuf>,

    /// Directory the stylesheets are written to
    #[arg(long)]
    out: Option<PathBuf>,

    /// Combined token file to discover sets from
    #[arg(long)]
    manifest: Option<PathBuf>,
}
impl ConfigArgs {
    fn load(&self) -> anyhow::Result<ProjectConfig> {
        let mut loader = match &self.config {
            Some(path) => Loader::new().with_file(path),
            None => Loader::new().with_optional_file(PROJECT_FILE),
        };
        for (key, value) in [
            ("tokens_dir", &self.tokens),
            ("build_path", &self.out),
            ("manifest", &self.manifest),
        ] {
            if let Some(value) = value {
                loader = loader.set_override(key, value.display().to_string())?;
            }
        }
        loader.build().context("failed to load configuration")
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build(args) => {
            let config = args.load()?;
            debug!(?config, "configuration loaded");
            let plan = BuildPlan::from_config(&config)?;
            for path in plan.run().context("build failed")? {
                println!("{}", path.display());
            }
        }
        Commands::Themes(args) => {
            let plan = BuildPlan::from_config(&args.load()?)?;
            for pass in &plan.passes {
                println!(
                    "{}\t{}\t{}",
                    pass.config.name,
                    plan.build_path.join(&pass.config.destination).display(),
                    pass.config.selector.as_deref().unwrap_or(":root")
                );
            }
        }
        Commands::Split(args) => {
            for set in split_manifest(&args.load()?)? {
                println!("{set}");
            }
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
