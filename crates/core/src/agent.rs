//! Head position and heading for one competitor, plus move resolution.

use crate::types::{Direction, Heading, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AgentState {
    pub pos: Pos,
    pub heading: Heading,
}

impl AgentState {
    pub fn new(pos: Pos, direction: Direction, speed: i32) -> Self {
        Self { pos, heading: direction.heading(speed) }
    }

    /// Applies `requested` only when it is an axis-aligned step of the current
    /// speed and both of its components differ from the current heading.
    /// Reversals and repeats share a component and are ignored, as are
    /// diagonal or resized headings. Returns whether the heading changed.
    pub fn request_turn(&mut self, requested: Heading) -> bool {
        let step = self.heading.dx.abs() + self.heading.dy.abs();
        let cardinal = requested.direction().is_some()
            && requested.dx.abs() + requested.dy.abs() == step;
        if !cardinal || requested.dx == self.heading.dx || requested.dy == self.heading.dy {
            return false;
        }
        self.heading = requested;
        true
    }

    pub fn turn(&mut self, direction: Direction, speed: i32) -> bool {
        self.request_turn(direction.heading(speed))
    }

    /// Moves the head one step along its heading.
    pub fn advance(&mut self) {
        self.pos = self.pos.offset(self.heading);
    }
}
