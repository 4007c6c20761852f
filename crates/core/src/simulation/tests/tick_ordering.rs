//! Tests for per-tick ordering, occupancy marking and percept timing.

use std::sync::{Arc, Mutex};

use super::support::*;
use crate::perception::Percept;

#[test]
fn surviving_heads_are_marked_after_each_tick() {
    let config = arena(40, 4, (pos(8, 20), Direction::North), (pos(28, 20), Direction::South));
    let mut sim = idle_match(config);
    let border_cells = sim.grid().occupied_count();

    assert_eq!(sim.tick(), GameState::Ongoing);
    assert_eq!(sim.current_tick(), 1);
    assert_eq!(sim.grid().occupant(pos(8, 24)), Occupant::Trail(Side::Red));
    assert_eq!(sim.grid().occupant(pos(28, 16)), Occupant::Trail(Side::Blue));
    assert_eq!(sim.grid().occupied_count(), border_cells + 2);
}

#[test]
fn start_cells_are_left_open() {
    let config = arena(40, 4, (pos(8, 20), Direction::North), (pos(28, 20), Direction::South));
    let mut sim = idle_match(config);
    sim.tick();
    assert!(!sim.grid().is_occupied(pos(8, 20)));
    assert!(!sim.grid().is_occupied(pos(28, 20)));
}

#[test]
fn facing_heads_close_the_gap_each_tick() {
    let config = arena(100, 4, (pos(20, 48), Direction::East), (pos(76, 52), Direction::West));
    let mut sim = idle_match(config);

    for _ in 0..7 {
        assert_eq!(sim.tick(), GameState::Ongoing);
    }
    assert_eq!(sim.agent(Side::Red).pos, pos(48, 48));
    assert_eq!(sim.agent(Side::Blue).pos, pos(48, 52));
}

#[test]
fn pilots_see_the_pre_move_world() {
    let seen: Arc<Mutex<Vec<Percept>>> = Arc::default();
    let recorder = {
        let seen = Arc::clone(&seen);
        move |percept: &Percept| -> Option<Direction> {
            seen.lock().expect("percept log").push(*percept);
            None
        }
    };
    let config = arena(40, 4, (pos(8, 20), Direction::North), (pos(28, 20), Direction::South));
    let mut sim = Simulation::new(config, Box::new(recorder), Box::new(Idle)).unwrap();

    sim.tick();
    sim.tick();
    let seen = seen.lock().expect("percept log");
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].own_position(), (0.2, 0.5));
    assert_eq!(seen[0].opponent_position(), (0.7, 0.5));
    assert_eq!(seen[1].own_position(), (0.2, 0.6));
    // The border sits three cells north; the start cell behind stays open.
    assert_eq!(seen[1].clearance(Direction::North), 0.5);
    assert_eq!(seen[1].clearance(Direction::South), 1.0);
}

#[test]
fn percepts_match_the_next_tick_inputs() {
    let config = arena(40, 4, (pos(8, 20), Direction::North), (pos(28, 20), Direction::South));
    let sim = idle_match(config);
    let (red, blue) = sim.percepts();
    assert_eq!(red.own_position(), blue.opponent_position());
    assert_eq!(blue.own_position(), red.opponent_position());
}

#[test]
fn identical_inputs_produce_identical_snapshots() {
    let run = || {
        let mut sim = idle_match(MatchConfig::with_grid(80, 4));
        let mut hashes = Vec::new();
        while !sim.state().is_terminal() {
            sim.tick();
            hashes.push(sim.snapshot_hash());
        }
        hashes
    };
    assert_eq!(run(), run());
}
