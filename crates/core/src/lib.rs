pub mod agent;
pub mod config;
pub mod fitness;
pub mod grid;
pub mod journal;
pub mod perception;
pub mod pilot;
pub mod replay;
pub mod simulation;
pub mod types;

pub use agent::AgentState;
pub use config::{ConfigError, MatchConfig};
pub use fitness::{FitnessFn, FitnessScores, FitnessStrategy, MatchSummary};
pub use grid::{Grid, Occupant};
pub use journal::{DecisionJournal, SteerRecord, TickRecord};
pub use perception::{PERCEPT_LEN, Percept};
pub use pilot::{DecisionError, Idle, Network, NetworkPilot, Pilot, Relay, Scripted, Wanderer};
pub use replay::*;
pub use simulation::{MatchResult, Simulation};
pub use types::*;
