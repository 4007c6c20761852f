//! Match configuration and its validation rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fitness::FitnessStrategy;
use crate::types::{Direction, Pos, Side};

pub const DEFAULT_GRID_SIZE: u32 = 400;
pub const DEFAULT_SPEED: u32 = 4;
pub const DEFAULT_SIGHT_RADIUS: u32 = 4;

/// Smallest lattice that still leaves open cells inside the border frame.
const MIN_CELLS_PER_SIDE: u32 = 3;
/// Largest lattice accepted; keeps the cell vector at 16M entries.
pub const MAX_CELLS_PER_SIDE: u32 = 4096;
/// Largest arena accepted; coordinates one step past the edge still fit in `i32`.
pub const MAX_GRID_SIZE: u32 = 1 << 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("speed must be positive")]
    ZeroSpeed,
    #[error("grid size {grid_size} is not divisible by speed {speed}")]
    GridNotDivisible { grid_size: u32, speed: u32 },
    #[error("grid has {cells_per_side} cells per side, need at least {MIN_CELLS_PER_SIDE}")]
    GridTooSmall { cells_per_side: u32 },
    #[error("grid size {grid_size} ({cells_per_side} cells per side) is too large")]
    GridTooLarge { grid_size: u32, cells_per_side: u32 },
    #[error("sight radius must be positive")]
    ZeroSightRadius,
    #[error("{side:?} start {pos:?} is not on the speed lattice")]
    StartOffLattice { side: Side, pos: Pos },
    #[error("{side:?} start {pos:?} is outside the open playfield")]
    StartOutsidePlayfield { side: Side, pos: Pos },
    #[error("both agents start on {pos:?}")]
    OverlappingStarts { pos: Pos },
    #[error("tick ceiling must be positive when set")]
    ZeroTickCeiling,
    #[error("invalid fitness strategy: {0}")]
    InvalidFitness(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub grid_size: u32,
    pub speed: u32,
    pub sight_radius: u32,
    pub red_start: Pos,
    pub blue_start: Pos,
    pub red_heading: Direction,
    pub blue_heading: Direction,
    /// Matches still ongoing after this many ticks are aborted as ties.
    pub tick_ceiling: Option<u64>,
    pub fitness: FitnessStrategy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::with_grid(DEFAULT_GRID_SIZE, DEFAULT_SPEED)
    }
}

impl MatchConfig {
    /// Builds a config for an arbitrary arena with starts at the quarter
    /// marks of the middle row, floored onto the speed lattice.
    pub fn with_grid(grid_size: u32, speed: u32) -> Self {
        let lattice = |value: u64| -> i32 {
            let step = u64::from(speed.max(1));
            i32::try_from(value / step * step).unwrap_or(i32::MAX)
        };
        let size = u64::from(grid_size);
        Self {
            grid_size,
            speed,
            sight_radius: DEFAULT_SIGHT_RADIUS,
            red_start: Pos { x: lattice(size / 4), y: lattice(size / 2) },
            blue_start: Pos { x: lattice(size * 3 / 4), y: lattice(size / 2) },
            red_heading: Direction::East,
            blue_heading: Direction::West,
            tick_ceiling: None,
            fitness: FitnessStrategy::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.grid_size % self.speed != 0 {
            return Err(ConfigError::GridNotDivisible {
                grid_size: self.grid_size,
                speed: self.speed,
            });
        }
        let cells_per_side = self.grid_size / self.speed;
        if cells_per_side < MIN_CELLS_PER_SIDE {
            return Err(ConfigError::GridTooSmall { cells_per_side });
        }
        if self.grid_size > MAX_GRID_SIZE || cells_per_side > MAX_CELLS_PER_SIDE {
            return Err(ConfigError::GridTooLarge { grid_size: self.grid_size, cells_per_side });
        }
        if self.sight_radius == 0 {
            return Err(ConfigError::ZeroSightRadius);
        }
        self.validate_start(Side::Red, self.red_start)?;
        self.validate_start(Side::Blue, self.blue_start)?;
        if self.red_start == self.blue_start {
            return Err(ConfigError::OverlappingStarts { pos: self.red_start });
        }
        if self.tick_ceiling == Some(0) {
            return Err(ConfigError::ZeroTickCeiling);
        }
        self.fitness.validate().map_err(ConfigError::InvalidFitness)
    }

    pub fn start(&self, side: Side) -> Pos {
        match side {
            Side::Red => self.red_start,
            Side::Blue => self.blue_start,
        }
    }

    pub fn start_heading(&self, side: Side) -> Direction {
        match side {
            Side::Red => self.red_heading,
            Side::Blue => self.blue_heading,
        }
    }

    /// True when `pos` lies on the one-cell border frame.
    pub fn is_border(&self, pos: Pos) -> bool {
        let step = self.speed as i32;
        let last = self.grid_size as i32 - step;
        pos.x <= 0 || pos.y <= 0 || pos.x >= last || pos.y >= last
    }

    pub fn center(&self) -> Pos {
        let half = (self.grid_size / 2) as i32;
        Pos { x: half, y: half }
    }

    fn validate_start(&self, side: Side, pos: Pos) -> Result<(), ConfigError> {
        let step = self.speed as i32;
        if pos.x.rem_euclid(step) != 0 || pos.y.rem_euclid(step) != 0 {
            return Err(ConfigError::StartOffLattice { side, pos });
        }
        let size = self.grid_size as i32;
        let inside = pos.x >= 0 && pos.y >= 0 && pos.x < size && pos.y < size;
        if !inside || self.is_border(pos) {
            return Err(ConfigError::StartOutsidePlayfield { side, pos });
        }
        Ok(())
    }
}
