//! Round-robin tournament: every contestant meets every contestant,
//! itself included, once per seat. Matches run in parallel.

use anyhow::{Context, Result};
use lightcycle_core::{GameState, MatchConfig, MatchResult, Side, Simulation};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::roster::PilotKind;

#[derive(Clone, Debug, PartialEq)]
pub struct Standing {
    pub contestant: PilotKind,
    pub fitness: f64,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Standing {
    fn new(contestant: PilotKind) -> Self {
        Self { contestant, fitness: 0.0, wins: 0, losses: 0, ties: 0 }
    }

    fn record(&mut self, result: &MatchResult, side: Side) {
        self.fitness += result.scores.for_side(side);
        match result.state.winner() {
            Some(winner) if winner == side => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.ties += 1,
        }
    }
}

/// Plays one match between two contestants.
pub fn play_match(config: &MatchConfig, red: PilotKind, blue: PilotKind) -> Result<MatchResult> {
    let mut sim = Simulation::new(config.clone(), red.build(), blue.build())
        .context("match config is invalid")?;
    sim.run_to_completion();
    sim.result().context("match did not reach a terminal state")
}

/// Returns one standing per contestant, in roster order.
pub fn run_tournament(config: &MatchConfig, roster: &[PilotKind]) -> Result<Vec<Standing>> {
    config.validate().context("match config is invalid")?;
    let pairings: Vec<(usize, usize)> = (0..roster.len())
        .flat_map(|red| (0..roster.len()).map(move |blue| (red, blue)))
        .collect();
    info!(contestants = roster.len(), matches = pairings.len(), "tournament starting");

    let results = pairings
        .par_iter()
        .map(|&(red, blue)| {
            play_match(config, roster[red], roster[blue]).map(|result| (red, blue, result))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut standings: Vec<Standing> = roster.iter().copied().map(Standing::new).collect();
    for (red, blue, result) in &results {
        debug!(
            red = %roster[*red],
            blue = %roster[*blue],
            state = ?result.state,
            ticks = result.ticks,
            "match scored"
        );
        standings[*red].record(result, Side::Red);
        standings[*blue].record(result, Side::Blue);
    }
    let ties = results.iter().filter(|(_, _, result)| result.state == GameState::Tie).count();
    info!(matches = results.len(), ties, "tournament finished");
    Ok(standings)
}
