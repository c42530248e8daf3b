use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagesnap_core::{AppConfig, SnapConfig};

mod commands;

#[derive(Parser)]
#[command(name = "pagesnap")]
#[command(author, version, about = "Full-viewport section snapping for plain-text decks")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deck to view (shorthand for `view`)
    deck: Option<PathBuf>,

    #[command(flatten)]
    snap: SnapArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a deck in the terminal viewer
    View {
        /// Deck file
        deck: PathBuf,
        #[command(flatten)]
        snap: SnapArgs,
    },
    /// Run a script of events against a headless host and print a JSON trace
    Simulate {
        /// Deck file
        deck: PathBuf,
        /// Script file, or `-` for stdin
        #[arg(short = 's', long)]
        script: PathBuf,
        #[command(flatten)]
        snap: SnapArgs,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// Per-run overrides for the `[snap]` config section
#[derive(Args, Debug, Clone)]
pub struct SnapArgs {
    /// Container to snap (`main`, `#main` or `.main`)
    #[arg(long, default_value = "main")]
    pub selector: String,
    /// Wrap around at both ends
    #[arg(long = "loop")]
    pub loop_sections: bool,
    /// Keep the location fragment in sync with the current section
    #[arg(long)]
    pub hash: bool,
    /// Transition time and input throttle window in milliseconds
    #[arg(long)]
    pub delay: Option<u64>,
    /// Disable navigation below this viewport width
    #[arg(long)]
    pub disable_below: Option<u32>,
    /// Initial location fragment
    #[arg(long)]
    pub fragment: Option<String>,
}

impl SnapArgs {
    /// Apply flags on top of the configured values
    pub fn apply(&self, base: &SnapConfig) -> SnapConfig {
        SnapConfig {
            delay_ms: self.delay.unwrap_or(base.delay_ms),
            loop_sections: base.loop_sections || self.loop_sections,
            hash: base.hash || self.hash,
            disable_below: self.disable_below.unwrap_or(base.disable_below),
        }
    }
}

/// Log to stderr, or to a file while the terminal viewer owns the screen
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let viewing = matches!(cli.command, Some(Commands::View { .. }))
        || (cli.command.is_none() && cli.deck.is_some());
    init_logging(&config, viewing)?;

    match cli.command {
        Some(Commands::View { deck, snap }) => commands::view::run(config, &deck, &snap).await,
        Some(Commands::Simulate { deck, script, snap }) => {
            commands::simulate::run(&config, &deck, &script, &snap).await
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init { force } => commands::config::init(force),
            ConfigAction::Show => commands::config::show(&config),
        },
        None => match cli.deck {
            Some(deck) => commands::view::run(config, &deck, &cli.snap).await,
            None => {
                Cli::command().print_help()?;
                bail!("no deck given");
            }
        },
    }
}
