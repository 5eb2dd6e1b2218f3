//! moodtune CLI
//!
//! - `infer <TEXT>`: detect the mood of a description
//! - `recommend <TEXT> --catalog <FILE>`: detect the mood and pick songs
//! - `moods`: list configured moods
//! - `languages --catalog <FILE>`: list the languages a catalog covers
//! - `init-config`: write the built-in mood configuration to disk

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use moodtune::config::{default_mood_config_path, load_mood_config, save_mood_config};
use moodtune::mood::MoodScore;
use moodtune::{InMemoryCatalog, MoodConfig, MoodEngine, Recommender};

#[derive(Parser)]
#[command(name = "moodtune")]
#[command(version)]
#[command(about = "Recommend songs from a free-text mood description")]
#[command(propagate_version = true)]
struct Cli {
    /// Mood configuration file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the mood of a description
    Infer {
        text: String,
        /// Include every mood's keyword score
        #[arg(long)]
        scores: bool,
    },
    /// Detect the mood and recommend songs from a catalog
    Recommend {
        text: String,
        /// JSON array of songs
        #[arg(long)]
        catalog: PathBuf,
        /// Only songs in this language ("all" disables the filter)
        #[arg(long)]
        language: Option<String>,
    },
    /// List configured moods with their keywords and display metadata
    Moods,
    /// List the distinct song languages in a catalog
    Languages {
        /// JSON array of songs
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Write the built-in mood configuration to the config path
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct InferOutput<'a> {
    #[serde(flatten)]
    result: &'a moodtune::InferenceResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<MoodScore>>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(default_mood_config_path);

    match cli.command {
        Commands::Infer { text, scores } => {
            let (_, engine) = load_engine(&config_path)?;
            let result = engine.infer(&text);
            let output = InferOutput {
                result: &result,
                scores: scores.then(|| engine.scores(&text)),
            };
            print_json(&output)
        }
        Commands::Recommend {
            text,
            catalog,
            language,
        } => {
            let (_, engine) = load_engine(&config_path)?;
            let catalog = InMemoryCatalog::load(&catalog)?;
            let recommender = Recommender::new(engine, Arc::new(catalog));
            print_json(&recommender.recommend(&text, language.as_deref()))
        }
        Commands::Moods => {
            let (config, _) = load_engine(&config_path)?;
            print_json(&config.moods)
        }
        Commands::Languages { catalog } => {
            let catalog = InMemoryCatalog::load(&catalog)?;
            print_json(&catalog.languages())
        }
        Commands::InitConfig { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            save_mood_config(&config_path, &MoodConfig::default())?;
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

/// Load and validate the mood configuration. Any problem is fatal.
fn load_engine(path: &Path) -> anyhow::Result<(MoodConfig, Arc<MoodEngine>)> {
    let config = load_mood_config(path)?;
    let engine = MoodEngine::from_config(&config).context("invalid mood configuration")?;
    Ok((config, Arc::new(engine)))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
