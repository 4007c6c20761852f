use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::types::{Direction, Side};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Everything needed to rebuild a match: its config and each tick's inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionJournal {
    pub format_version: u16,
    pub config: MatchConfig,
    pub ticks: Vec<TickRecord>,
    /// The match was stopped from outside after the last recorded tick.
    pub aborted: bool,
    /// Outside turn requests made after the last tick of an aborted match.
    #[serde(default)]
    pub trailing_steers: Vec<SteerRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    pub tick: u64,
    /// Outside turn requests applied before this tick's pilots were consulted.
    pub steers: Vec<SteerRecord>,
    pub red: Option<Direction>,
    pub blue: Option<Direction>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteerRecord {
    pub side: Side,
    pub direction: Direction,
}

impl DecisionJournal {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            config,
            ticks: Vec::new(),
            aborted: false,
            trailing_steers: Vec::new(),
        }
    }

    pub fn moves(&self, side: Side) -> Vec<Option<Direction>> {
        self.ticks
            .iter()
            .map(|record| match side {
                Side::Red => record.red,
                Side::Blue => record.blue,
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
