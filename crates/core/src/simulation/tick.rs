//! Per-tick order of operations: perceive, decide, turn, advance, collide, mark.

use std::mem;

use tracing::{debug, info, trace};

use super::*;
use crate::grid::Occupant;
use crate::journal::TickRecord;

impl Simulation {
    /// Advances the match by one step. Once terminal, further calls return
    /// the frozen state without touching the grid or the agents.
    pub fn tick(&mut self) -> GameState {
        if self.state.is_terminal() {
            return self.state;
        }

        // Both pilots see the pre-move world, never each other's move.
        let (red_percept, blue_percept) = self.percepts();
        let red_move = self.consult(Side::Red, &red_percept);
        let blue_move = self.consult(Side::Blue, &blue_percept);
        if let Some(direction) = red_move {
            self.apply_turn(Side::Red, direction);
        }
        if let Some(direction) = blue_move {
            self.apply_turn(Side::Blue, direction);
        }
        self.journal.ticks.push(TickRecord {
            tick: self.tick,
            steers: mem::take(&mut self.pending_steers),
            red: red_move,
            blue: blue_move,
        });

        self.red.advance();
        self.blue.advance();

        let head_on = self.red.pos == self.blue.pos;
        let mut red_death = self.collision(self.red.pos);
        let mut blue_death = self.collision(self.blue.pos);
        if head_on {
            red_death = red_death.or(Some(DeathCause::HeadOn));
            blue_death = blue_death.or(Some(DeathCause::HeadOn));
        }

        let next = resolve_state(head_on, red_death.is_some(), blue_death.is_some());
        if next == GameState::Ongoing {
            self.grid.mark_occupied(self.red.pos, Side::Red);
            self.grid.mark_occupied(self.blue.pos, Side::Blue);
            self.tick += 1;
            return next;
        }

        self.finish(next, red_death, blue_death);
        next
    }

    pub(super) fn apply_turn(&mut self, side: Side, direction: Direction) -> bool {
        let speed = self.config.speed as i32;
        let tick = self.tick;
        let applied = self.agent_mut(side).turn(direction, speed);
        if applied {
            debug!(tick, ?side, ?direction, "turn applied");
            self.log.push(MatchEvent::Turned { tick, side, direction });
        } else {
            trace!(tick, ?side, ?direction, "turn ignored");
        }
        applied
    }

    fn consult(&mut self, side: Side, percept: &Percept) -> Option<Direction> {
        let pilot = match side {
            Side::Red => &mut self.red_pilot,
            Side::Blue => &mut self.blue_pilot,
        };
        match pilot.decide(percept) {
            Ok(decision) => decision,
            Err(err) => {
                debug!(tick = self.tick, ?side, %err, "malformed decision treated as no move");
                self.log.push(MatchEvent::MalformedDecision {
                    tick: self.tick,
                    side,
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    fn collision(&self, head: Pos) -> Option<DeathCause> {
        if !self.grid.contains(head) {
            return Some(DeathCause::Wall);
        }
        match self.grid.occupant(head) {
            Occupant::Empty => None,
            Occupant::Wall => Some(DeathCause::Wall),
            Occupant::Trail(_) => Some(DeathCause::Trail),
        }
    }

    fn finish(
        &mut self,
        state: GameState,
        red_death: Option<DeathCause>,
        blue_death: Option<DeathCause>,
    ) {
        self.state = state;
        self.red_death = red_death;
        self.blue_death = blue_death;
        for (side, death, pos) in
            [(Side::Red, red_death, self.red.pos), (Side::Blue, blue_death, self.blue.pos)]
        {
            if let Some(cause) = death {
                self.log.push(MatchEvent::Died { tick: self.tick, side, cause, pos });
            }
        }
        self.log.push(MatchEvent::Finished { tick: self.tick, state });
        info!(tick = self.tick, ?state, ?red_death, ?blue_death, "match finished");
    }
}

/// Terminal precedence: a shared cell or a double death is a tie, then a
/// single death hands the win to the survivor.
pub(crate) fn resolve_state(head_on: bool, red_dead: bool, blue_dead: bool) -> GameState {
    if head_on || (red_dead && blue_dead) {
        GameState::Tie
    } else if red_dead {
        GameState::BlueWon
    } else if blue_dead {
        GameState::RedWon
    } else {
        GameState::Ongoing
    }
}
