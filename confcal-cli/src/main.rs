mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use confcal_core::{GeneratorConfig, IcsGenerator};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "confcal")]
#[command(about = "Generate .ics calendar files for conference events")]
struct Cli {
    /// Config file to use (defaults to ~/.config/confcal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory to write .ics files to (overrides output_dir from config)
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Without a subcommand, interactively generate the featured event
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the featured event without prompting and preview the file
    Demo,
    /// Show the featured event details
    Show,
    /// Generate one .ics file per event in a JSON or TOML file
    Batch {
        /// File with an array of events (title, start, end, location, ...)
        file: PathBuf,
    },
    /// Show config and output paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => GeneratorConfig::config_path()?,
    };

    let mut config = GeneratorConfig::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let generator = IcsGenerator::new(config)?;

    match cli.command {
        None => commands::generate::run(&generator),
        Some(Commands::Demo) => commands::demo::run(&generator),
        Some(Commands::Show) => commands::show::run(&generator),
        Some(Commands::Batch { file }) => commands::batch::run(&generator, &file),
        Some(Commands::Config) => commands::config::run(&config_path, generator.config()),
    }
}
