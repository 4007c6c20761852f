//! Stable snapshot hashing for determinism checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Simulation {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.tick);
        hasher.write_u8(match self.state {
            GameState::Ongoing => 0,
            GameState::RedWon => 1,
            GameState::BlueWon => 2,
            GameState::Tie => 3,
        });
        hasher.write_u8(u8::from(self.aborted));
        for agent in [&self.red, &self.blue] {
            hasher.write_i32(agent.pos.x);
            hasher.write_i32(agent.pos.y);
            hasher.write_i32(agent.heading.dx);
            hasher.write_i32(agent.heading.dy);
        }
        for cell in self.grid.cells() {
            hasher.write_u8(cell.code());
        }
        hasher.finish()
    }
}
