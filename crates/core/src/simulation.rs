//! One match: owns its grid, both agents and both pilots.
//! Nothing here is shared between matches, so matches can run on any thread.

use tracing::info;

use crate::agent::AgentState;
use crate::config::{ConfigError, MatchConfig};
use crate::fitness::{FitnessFn, FitnessScores, MatchSummary};
use crate::grid::Grid;
use crate::journal::{DecisionJournal, SteerRecord};
use crate::perception::{Percept, perceive};
use crate::pilot::Pilot;
use crate::types::*;

mod hash;
mod tick;


#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    pub state: GameState,
    pub ticks: u64,
    pub red_pos: Pos,
    pub blue_pos: Pos,
    pub red_death: Option<DeathCause>,
    pub blue_death: Option<DeathCause>,
    /// Set when the match was stopped from outside rather than decided.
    pub aborted: bool,
    pub scores: FitnessScores,
}

impl MatchResult {
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            state: self.state,
            ticks: self.ticks,
            red_pos: self.red_pos,
            blue_pos: self.blue_pos,
        }
    }
}

pub struct Simulation {
    config: MatchConfig,
    grid: Grid,
    red: AgentState,
    blue: AgentState,
    red_pilot: Box<dyn Pilot>,
    blue_pilot: Box<dyn Pilot>,
    tick: u64,
    state: GameState,
    red_death: Option<DeathCause>,
    blue_death: Option<DeathCause>,
    aborted: bool,
    log: Vec<MatchEvent>,
    journal: DecisionJournal,
    pending_steers: Vec<SteerRecord>,
}

impl Simulation {
    pub fn new(
        config: MatchConfig,
        red_pilot: Box<dyn Pilot>,
        blue_pilot: Box<dyn Pilot>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let speed = config.speed as i32;
        let grid = Grid::new(config.grid_size, config.speed);
        let red = AgentState::new(config.red_start, config.red_heading, speed);
        let blue = AgentState::new(config.blue_start, config.blue_heading, speed);
        let journal = DecisionJournal::new(config.clone());
        Ok(Self {
            config,
            grid,
            red,
            blue,
            red_pilot,
            blue_pilot,
            tick: 0,
            state: GameState::Ongoing,
            red_death: None,
            blue_death: None,
            aborted: false,
            log: Vec::new(),
            journal,
            pending_steers: Vec::new(),
        })
    }

    /// Ticks until the match ends or the configured tick ceiling is reached,
    /// in which case the match is aborted as a tie.
    pub fn run_to_completion(&mut self) -> GameState {
        while !self.state.is_terminal() {
            if self.config.tick_ceiling.is_some_and(|ceiling| self.tick >= ceiling) {
                return self.abort();
            }
            self.tick();
        }
        self.state
    }

    /// Stops an ongoing match at the current tick boundary, scoring it as a tie.
    pub fn abort(&mut self) -> GameState {
        if self.state.is_terminal() {
            return self.state;
        }
        self.state = GameState::Tie;
        self.aborted = true;
        self.journal.aborted = true;
        self.journal.trailing_steers = std::mem::take(&mut self.pending_steers);
        self.log.push(MatchEvent::Aborted { tick: self.tick });
        info!(tick = self.tick, "match aborted at tick boundary");
        self.state
    }

    /// Applies an outside turn request (a human key press) between ticks.
    pub fn steer(&mut self, side: Side, direction: Direction) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.pending_steers.push(SteerRecord { side, direction });
        self.apply_turn(side, direction)
    }

    pub fn result(&self) -> Option<MatchResult> {
        if !self.state.is_terminal() {
            return None;
        }
        let summary = MatchSummary {
            state: self.state,
            ticks: self.tick,
            red_pos: self.red.pos,
            blue_pos: self.blue.pos,
        };
        Some(MatchResult {
            state: self.state,
            ticks: self.tick,
            red_pos: self.red.pos,
            blue_pos: self.blue.pos,
            red_death: self.red_death,
            blue_death: self.blue_death,
            aborted: self.aborted,
            scores: self.config.fitness.score(&self.config, &summary),
        })
    }

    /// Percepts both agents would receive at the start of the next tick.
    pub fn percepts(&self) -> (Percept, Percept) {
        let radius = self.config.sight_radius;
        (
            perceive(&self.grid, &self.red, &self.blue, radius),
            perceive(&self.grid, &self.blue, &self.red, radius),
        )
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent(&self, side: Side) -> &AgentState {
        match side {
            Side::Red => &self.red,
            Side::Blue => &self.blue,
        }
    }

    pub fn death(&self, side: Side) -> Option<DeathCause> {
        match side {
            Side::Red => self.red_death,
            Side::Blue => self.blue_death,
        }
    }

    pub fn log(&self) -> &[MatchEvent] {
        &self.log
    }

    pub fn journal(&self) -> &DecisionJournal {
        &self.journal
    }

    fn agent_mut(&mut self, side: Side) -> &mut AgentState {
        match side {
            Side::Red => &mut self.red,
            Side::Blue => &mut self.blue,
        }
    }
}
