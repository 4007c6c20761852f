use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightcycle_core::{ReplayResult, Simulation, replay_to_end};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod journal_file;
mod roster;
mod settings;
mod tournament;

use journal_file::{load_journal_from_file, save_journal};
use roster::PilotKind;

const DEFAULT_LOG_FILTER: &str = "tools=info,lightcycle_core=warn";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one match headlessly and print the result
    Play {
        /// Match config TOML; defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Red pilot: idle, wander:<seed> or net:<seed>
        #[arg(long, default_value = "wander:1")]
        red: PilotKind,
        /// Blue pilot: idle, wander:<seed> or net:<seed>
        #[arg(long, default_value = "wander:2")]
        blue: PilotKind,
        /// Write the decision journal (JSONL) here
        #[arg(short, long)]
        journal: Option<PathBuf>,
        /// Print the final arena
        #[arg(long)]
        show_grid: bool,
    },
    /// Rebuild a recorded match and print its final state and hash
    Replay {
        #[arg(short, long)]
        journal: PathBuf,
    },
    /// Round-robin every contestant against every contestant, both seats
    Tournament {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(required = true, num_args = 1..)]
        contestants: Vec<PilotKind>,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Play { config, red, blue, journal, show_grid } => {
            play(config, red, blue, journal, show_grid)
        }
        Command::Replay { journal } => replay(journal),
        Command::Tournament { config, contestants } => run_tournament(config, &contestants),
    }
}

fn play(
    config: Option<PathBuf>,
    red: PilotKind,
    blue: PilotKind,
    journal: Option<PathBuf>,
    show_grid: bool,
) -> Result<()> {
    let config = settings::load_config(config.as_deref())?;
    info!(%red, %blue, grid_size = config.grid_size, "starting match");

    let mut sim =
        Simulation::new(config, red.build(), blue.build()).context("match config is invalid")?;
    sim.run_to_completion();
    let result = sim.result().context("match did not reach a terminal state")?;

    if let Some(path) = journal {
        save_journal(&path, sim.journal(), env!("CARGO_PKG_VERSION"))
            .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
        info!(path = %path.display(), ticks = sim.journal().ticks.len(), "journal written");
    }

    if show_grid {
        println!("{}", sim.grid().render_ascii());
    }
    println!("Outcome: {:?}{}", result.state, if result.aborted { " (aborted)" } else { "" });
    println!("Ticks: {}", result.ticks);
    println!("Red: {:?} at ({}, {})", result.red_death, result.red_pos.x, result.red_pos.y);
    println!("Blue: {:?} at ({}, {})", result.blue_death, result.blue_pos.x, result.blue_pos.y);
    println!("Fitness: red {} / blue {}", result.scores.red, result.scores.blue);
    println!("Snapshot Hash: {}", sim.snapshot_hash());
    Ok(())
}

fn replay(path: PathBuf) -> Result<()> {
    let loaded = load_journal_from_file(&path)
        .with_context(|| format!("Failed to load journal file: {}", path.display()))?;
    if loaded.build_id != env!("CARGO_PKG_VERSION") {
        info!(recorded = %loaded.build_id, "journal was written by a different build");
    }

    let result: ReplayResult = replay_to_end(&loaded.journal)
        .map_err(|e| anyhow::anyhow!("Replay failed during execution: {e:?}"))?;

    println!("Replay complete.");
    println!("Final Tick: {}", result.final_tick);
    println!("Outcome: {:?}", result.final_state);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);
    Ok(())
}

fn run_tournament(config: Option<PathBuf>, contestants: &[PilotKind]) -> Result<()> {
    let config = settings::load_config(config.as_deref())?;
    let mut standings = tournament::run_tournament(&config, contestants)?;
    standings.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

    println!("{:<16} {:>12} {:>5} {:>5} {:>5}", "contestant", "fitness", "won", "lost", "tied");
    for standing in &standings {
        println!(
            "{:<16} {:>12.1} {:>5} {:>5} {:>5}",
            standing.contestant.to_string(),
            standing.fitness,
            standing.wins,
            standing.losses,
            standing.ties
        );
    }
    Ok(())
}
