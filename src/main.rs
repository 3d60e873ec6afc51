//! a3s-gate - screen prompts before they reach the generation backend
//!
//! Prints one JSON verdict per evaluated prompt.

use a3s_gate::{GateConfig, GateService, Pipeline};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "a3s-gate")]
#[command(author = "A3S Lab")]
#[command(version)]
#[command(about = "Request admission gate for A3S assistants")]
struct Cli {
    /// Configuration file path (.json)
    #[arg(short, long, env = "A3S_GATE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the keyword files. Without it, resources named in
    /// the config file are used, then the bundled lists.
    #[arg(short, long, env = "A3S_GATE_RESOURCES")]
    resources: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate prompts in order, sharing one history
    Check {
        /// Prompts to evaluate
        #[arg(required = true)]
        prompts: Vec<String>,
    },

    /// Read prompts from stdin, one per line
    Repl,

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("a3s_gate={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => GateConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GateConfig::default(),
    };

    match cli.command {
        Commands::Config => {
            let json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize configuration")?;
            println!("{}", json);
        }
        Commands::Check { prompts } => {
            let gate = build_service(&config, cli.config.as_deref(), cli.resources.as_deref())?;
            for prompt in &prompts {
                print_verdict(&gate, prompt).await?;
            }
        }
        Commands::Repl => {
            let gate = build_service(&config, cli.config.as_deref(), cli.resources.as_deref())?;
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
                print_verdict(&gate, &line).await?;
            }
            let stats = gate.stats().await;
            tracing::info!(
                total = stats.total,
                passed = stats.passed,
                informed = stats.informed,
                rejected = stats.rejected_total(),
                "Session finished"
            );
        }
    }

    Ok(())
}

/// `--resources` wins; otherwise resources named in the config file are
/// resolved against the file's directory. With neither, the bundled lists
/// are used.
fn build_service(
    config: &GateConfig,
    config_path: Option<&Path>,
    resources: Option<&Path>,
) -> Result<GateService> {
    let pipeline = match resources {
        Some(dir) => Pipeline::from_dir(config, dir)
            .with_context(|| format!("Failed to load keyword resources from {}", dir.display()))?,
        None => {
            let base = config_path
                .and_then(Path::parent)
                .unwrap_or_else(|| Path::new(""));
            Pipeline::from_config(config, base).context("Failed to load keyword resources")?
        }
    };
    Ok(GateService::new(pipeline))
}

async fn print_verdict(gate: &GateService, prompt: &str) -> Result<()> {
    let verdict = gate.evaluate(prompt).await;
    let json = serde_json::to_string(&verdict).context("Failed to serialize verdict")?;
    println!("{}", json);
    Ok(())
}
