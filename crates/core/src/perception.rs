//! Percepts for decision makers: bounded ray casts plus normalized coordinates.
//! Everything here reads the grid and agents without mutating them.

use crate::agent::AgentState;
use crate::grid::Grid;
use crate::types::{Direction, Pos};

/// Four clearances followed by own `(x, y)` and opponent `(x, y)`.
pub const PERCEPT_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Percept {
    values: [f32; PERCEPT_LEN],
}

impl Percept {
    pub fn from_values(values: [f32; PERCEPT_LEN]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn clearance(&self, direction: Direction) -> f32 {
        match direction {
            Direction::North => self.values[0],
            Direction::South => self.values[1],
            Direction::East => self.values[2],
            Direction::West => self.values[3],
        }
    }

    pub fn own_position(&self) -> (f32, f32) {
        (self.values[4], self.values[5])
    }

    pub fn opponent_position(&self) -> (f32, f32) {
        (self.values[6], self.values[7])
    }
}

/// Counts consecutive open lattice cells from `from` toward `direction`,
/// stopping at the first occupied cell, the arena edge, or `sight_radius`.
pub fn clear_steps(grid: &Grid, from: Pos, direction: Direction, sight_radius: u32) -> u32 {
    let step = direction.heading(grid.speed());
    let mut cell = from;
    let mut steps = 0;
    while steps < sight_radius {
        cell = cell.offset(step);
        if !grid.contains(cell) || grid.is_occupied(cell) {
            break;
        }
        steps += 1;
    }
    steps
}

pub fn perceive(
    grid: &Grid,
    own: &AgentState,
    opponent: &AgentState,
    sight_radius: u32,
) -> Percept {
    let radius = sight_radius as f32;
    let size = grid.grid_size() as f32;
    let mut values = [0.0; PERCEPT_LEN];
    for (slot, direction) in Direction::ALL.into_iter().enumerate() {
        values[slot] = clear_steps(grid, own.pos, direction, sight_radius) as f32 / radius;
    }
    values[4] = own.pos.x as f32 / size;
    values[5] = own.pos.y as f32 / size;
    values[6] = opponent.pos.x as f32 / size;
    values[7] = opponent.pos.y as f32 / size;
    Percept { values }
}
