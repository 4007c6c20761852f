//! Fitness scoring strategies.
//!
//! A strategy sees only the frozen end of a match (terminal state, tick count
//! and both final head positions) plus the match configuration, and returns a
//! score for each side. Aborted matches arrive here as ties.

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::types::{GameState, Pos, Side, manhattan};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub state: GameState,
    pub ticks: u64,
    pub red_pos: Pos,
    pub blue_pos: Pos,
}

impl MatchSummary {
    pub fn final_pos(&self, side: Side) -> Pos {
        match side {
            Side::Red => self.red_pos,
            Side::Blue => self.blue_pos,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessScores {
    pub red: f64,
    pub blue: f64,
}

impl FitnessScores {
    pub fn for_side(&self, side: Side) -> f64 {
        match side {
            Side::Red => self.red,
            Side::Blue => self.blue,
        }
    }

    fn oriented(winner: Side, winner_score: f64, loser_score: f64) -> Self {
        match winner {
            Side::Red => Self { red: winner_score, blue: loser_score },
            Side::Blue => Self { red: loser_score, blue: winner_score },
        }
    }

    fn even(score: f64) -> Self {
        Self { red: score, blue: score }
    }
}

/// Pure scoring over a finished match.
pub trait FitnessFn {
    fn score(&self, config: &MatchConfig, summary: &MatchSummary) -> FitnessScores;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FitnessStrategy {
    /// Tie: both get `-tie_penalty`. Winner: `win_bonus + ticks`. Loser: `ticks`.
    Basic { win_bonus: f64, tie_penalty: f64 },
    /// Like `Basic`, but beating an opponent that hit the outer wall pays
    /// `wall_bonus` instead of `win_bonus`.
    WallBonus { win_bonus: f64, wall_bonus: f64, tie_penalty: f64 },
    /// Winner is rewarded for distance from its own start and penalized for
    /// distance from the arena center (both in lattice steps). The loser gets
    /// `loser_scale * (ticks % loser_period)`, a sawtooth over match length.
    DistanceShaped {
        win_bonus: f64,
        tie_penalty: f64,
        travel_weight: f64,
        center_weight: f64,
        loser_period: u64,
        loser_scale: f64,
    },
    /// Tie: `(0, 0)`. Winner: `win_bonus + ticks`. Loser: `0`.
    WinnerTakesAll { win_bonus: f64 },
}

impl Default for FitnessStrategy {
    fn default() -> Self {
        Self::Basic { win_bonus: 500.0, tie_penalty: 50.0 }
    }
}

impl FitnessStrategy {
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Self::DistanceShaped { loser_period: 0, .. } => {
                Err("distance-shaped loser period must be positive".to_string())
            }
            Self::WallBonus { win_bonus, wall_bonus, .. } if wall_bonus < win_bonus => Err(format!(
                "wall bonus {wall_bonus} must be at least the win bonus {win_bonus}"
            )),
            _ => Ok(()),
        }
    }
}

impl FitnessFn for FitnessStrategy {
    fn score(&self, config: &MatchConfig, summary: &MatchSummary) -> FitnessScores {
        let ticks = summary.ticks as f64;
        let Some(winner) = summary.state.winner() else {
            return match *self {
                Self::Basic { tie_penalty, .. }
                | Self::WallBonus { tie_penalty, .. }
                | Self::DistanceShaped { tie_penalty, .. } => FitnessScores::even(-tie_penalty),
                Self::WinnerTakesAll { .. } => FitnessScores::even(0.0),
            };
        };
        let loser = winner.opponent();

        match *self {
            Self::Basic { win_bonus, .. } => {
                FitnessScores::oriented(winner, win_bonus + ticks, ticks)
            }
            Self::WallBonus { win_bonus, wall_bonus, .. } => {
                let bonus =
                    if config.is_border(summary.final_pos(loser)) { wall_bonus } else { win_bonus };
                FitnessScores::oriented(winner, bonus + ticks, ticks)
            }
            Self::DistanceShaped {
                win_bonus,
                travel_weight,
                center_weight,
                loser_period,
                loser_scale,
                ..
            } => {
                let step = f64::from(config.speed.max(1));
                let end = summary.final_pos(winner);
                let travel = f64::from(manhattan(end, config.start(winner))) / step;
                let off_center = f64::from(manhattan(end, config.center())) / step;
                let winner_score =
                    win_bonus + ticks + travel_weight * travel - center_weight * off_center;
                let loser_score = loser_scale * (summary.ticks % loser_period.max(1)) as f64;
                FitnessScores::oriented(winner, winner_score, loser_score)
            }
            Self::WinnerTakesAll { win_bonus } => {
                FitnessScores::oriented(winner, win_bonus + ticks, 0.0)
            }
        }
    }
}
