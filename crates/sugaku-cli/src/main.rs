//! sugaku CLI: the interactive maths quiz and its statistics commands.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sugaku_core::config::load_config_from;
use sugaku_core::model::ProblemKind;
use sugaku_core::player::StatsStore;
use tracing_subscriber::EnvFilter;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "sugaku", version, about = "Console maths quiz with persistent statistics")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Statistics file (overrides config and SUGAKU_STATS_FILE)
    #[arg(long, global = true)]
    stats_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the quiz menu (the default)
    Play {
        /// Questions per game
        #[arg(long)]
        rounds: Option<usize>,

        /// RNG seed for a reproducible sequence of problems
        #[arg(long)]
        seed: Option<u64>,

        /// Pause after each verdict, in milliseconds
        #[arg(long)]
        pause_ms: Option<u64>,

        /// Problem kinds (comma-separated, e.g. "expand,median")
        #[arg(long)]
        kinds: Option<String>,
    },

    /// Show lifetime statistics
    Stats,

    /// Delete the statistics file
    Reset,

    /// Create a starter sugaku.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sugaku=warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Play {
        rounds: None,
        seed: None,
        pause_ms: None,
        kinds: None,
    });
    if let Commands::Init = command {
        return commands::init::execute();
    }

    let mut config = load_config_from(cli.config.as_deref())?;
    if let Some(path) = cli.stats_file {
        config.stats_file = path;
    }

    match command {
        Commands::Play {
            rounds,
            seed,
            pause_ms,
            kinds,
        } => {
            if let Some(rounds) = rounds {
                config.rounds = rounds;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(pause_ms) = pause_ms {
                config.pause_ms = pause_ms;
            }
            if let Some(kinds) = kinds {
                config.kinds = parse_kinds(&kinds)?;
            }
            config.validate()?;
            commands::play::execute(&config)
        }
        Commands::Stats => commands::stats::execute(&StatsStore::new(&config.stats_file)),
        Commands::Reset => commands::reset::execute(&StatsStore::new(&config.stats_file)),
        Commands::Init => commands::init::execute(),
    }
}

fn parse_kinds(list: &str) -> Result<Vec<ProblemKind>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<ProblemKind>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid --kinds value: {list}"))
        })
        .collect()
}
