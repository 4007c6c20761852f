//! Decision sources. A pilot maps the pre-move percept to an optional turn.
//! Pilots are untrusted: an `Err` from `decide` is treated as "no turn".

use std::sync::mpsc::{self, Receiver, Sender};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use thiserror::Error;

use crate::perception::Percept;
use crate::types::Direction;

/// Activation level at which a network output counts as pressed.
pub const OUTPUT_THRESHOLD: f32 = 0.5;
/// Network output order: north, south, west, east.
pub const NETWORK_OUTPUTS: [Direction; 4] =
    [Direction::North, Direction::South, Direction::West, Direction::East];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("expected {expected} outputs, got {got}")]
    WrongArity { expected: usize, got: usize },
    #[error("output {index} is not a finite number")]
    NonFinite { index: usize },
}

pub trait Pilot: Send {
    fn decide(&mut self, percept: &Percept) -> Result<Option<Direction>, DecisionError>;
}

impl<F> Pilot for F
where
    F: FnMut(&Percept) -> Option<Direction> + Send,
{
    fn decide(&mut self, percept: &Percept) -> Result<Option<Direction>, DecisionError> {
        Ok(self(percept))
    }
}

/// Never turns.
#[derive(Clone, Copy, Debug, Default)]
pub struct Idle;

impl Pilot for Idle {
    fn decide(&mut self, _percept: &Percept) -> Result<Option<Direction>, DecisionError> {
        Ok(None)
    }
}

/// Forwards key presses queued by an outside input layer. The newest press
/// queued since the previous tick wins, so at most one turn is requested per
/// tick: north then west on an east-bound cycle only requests west, which
/// the turn rule ignores as a reversal, instead of chaining two turns. Input
/// layers that want every press applied as it arrives call
/// `Simulation::steer` per press instead.
pub struct Relay {
    inbox: Receiver<Direction>,
}

impl Relay {
    pub fn channel() -> (Sender<Direction>, Self) {
        let (sender, inbox) = mpsc::channel();
        (sender, Self { inbox })
    }
}

impl Pilot for Relay {
    fn decide(&mut self, _percept: &Percept) -> Result<Option<Direction>, DecisionError> {
        Ok(self.inbox.try_iter().last())
    }
}

/// Plays back one recorded decision per tick, then idles.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    moves: Vec<Option<Direction>>,
    cursor: usize,
}

impl Scripted {
    pub fn new(moves: Vec<Option<Direction>>) -> Self {
        Self { moves, cursor: 0 }
    }
}

impl Pilot for Scripted {
    fn decide(&mut self, _percept: &Percept) -> Result<Option<Direction>, DecisionError> {
        let next = self.moves.get(self.cursor).copied().flatten();
        self.cursor += 1;
        Ok(next)
    }
}

/// Seeded random turner that prefers directions with open cells ahead.
pub struct Wanderer {
    rng: ChaCha8Rng,
    turn_percent: u64,
}

impl Wanderer {
    pub fn new(seed: u64, turn_percent: u8) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            turn_percent: u64::from(turn_percent.min(100)),
        }
    }
}

impl Pilot for Wanderer {
    fn decide(&mut self, percept: &Percept) -> Result<Option<Direction>, DecisionError> {
        if self.rng.next_u64() % 100 >= self.turn_percent {
            return Ok(None);
        }
        let open: Vec<Direction> =
            Direction::ALL.into_iter().filter(|dir| percept.clearance(*dir) > 0.0).collect();
        let pool = if open.is_empty() { &Direction::ALL[..] } else { &open[..] };
        let pick = self.rng.next_u64() as usize % pool.len();
        Ok(Some(pool[pick]))
    }
}

/// Anything that turns a percept slice into output activations.
pub trait Network: Send {
    fn activate(&mut self, inputs: &[f32]) -> Vec<f32>;
}

/// Adapts a `Network` with four outputs into a pilot.
pub struct NetworkPilot<N> {
    network: N,
}

impl<N: Network> NetworkPilot<N> {
    pub fn new(network: N) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &N {
        &self.network
    }
}

impl<N: Network> Pilot for NetworkPilot<N> {
    fn decide(&mut self, percept: &Percept) -> Result<Option<Direction>, DecisionError> {
        let outputs = self.network.activate(percept.as_slice());
        decode_outputs(&outputs)
    }
}

/// Picks the strongest output at or above the threshold; ties go to the
/// earlier slot in `NETWORK_OUTPUTS`. Only that one direction reaches the
/// turn rule. Feeding every pressed output through the turn rule in
/// north, south, west, east order could chain two turns in one tick; this
/// decoder never does.
pub fn decode_outputs(outputs: &[f32]) -> Result<Option<Direction>, DecisionError> {
    if outputs.len() != NETWORK_OUTPUTS.len() {
        return Err(DecisionError::WrongArity {
            expected: NETWORK_OUTPUTS.len(),
            got: outputs.len(),
        });
    }
    if let Some(index) = outputs.iter().position(|value| !value.is_finite()) {
        return Err(DecisionError::NonFinite { index });
    }
    let mut best: Option<(usize, f32)> = None;
    for (index, value) in outputs.iter().copied().enumerate() {
        if value < OUTPUT_THRESHOLD {
            continue;
        }
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((index, value));
        }
    }
    Ok(best.map(|(index, _)| NETWORK_OUTPUTS[index]))
}
