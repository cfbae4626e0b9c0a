use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use editbridge_cli::harness;

#[derive(Parser)]
#[command(
    name = "editbridge",
    version,
    about = "Visual edit bridge harness - replay editor protocol scripts against page fixtures"
)]
struct Cli {
    /// Bridge config file (YAML); built-in defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Feed a JSON-lines message script to the bridge and print outbound
    /// messages on stdout.
    Replay {
        /// Page fixture (JSON).
        #[arg(long)]
        page: PathBuf,
        /// Message script (one inbound message per line).
        #[arg(long)]
        messages: PathBuf,
    },
    /// Extract an element descriptor for a selector.
    Inspect {
        #[arg(long)]
        page: PathBuf,
        selector: String,
    },
    /// Resolve viewport coordinates to a synthesized selector.
    Synth {
        #[arg(long)]
        page: PathBuf,
        x: f64,
        y: f64,
    },
    /// Place the highlight overlay over a selector and print its
    /// geometry.
    Highlight {
        #[arg(long)]
        page: PathBuf,
        selector: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = harness::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Replay { page, messages } => harness::replay(&page, &messages, config).await,
        Command::Inspect { page, selector } => harness::inspect(&page, &selector, config),
        Command::Synth { page, x, y } => harness::synth(&page, x, y, config),
        Command::Highlight { page, selector } => harness::highlight(&page, &selector, config),
    }
}

/// Logs go to stderr so stdout stays a clean outbound-message stream.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
