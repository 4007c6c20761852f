//! Tests for applying pilot decisions and outside steering.

use super::support::*;
use crate::pilot::{DecisionError, Network, NetworkPilot, Relay};
use crate::perception::Percept;

struct Broken;

impl Network for Broken {
    fn activate(&mut self, _inputs: &[f32]) -> Vec<f32> {
        vec![1.0; 3]
    }
}

struct Pressed(Vec<f32>);

impl Network for Pressed {
    fn activate(&mut self, _inputs: &[f32]) -> Vec<f32> {
        self.0.clone()
    }
}

fn always(direction: Direction) -> impl Pilot {
    move |_: &Percept| Some(direction)
}

#[test]
fn pilot_reversal_requests_are_ignored() {
    let config = arena(40, 4, (pos(8, 20), Direction::East), (pos(28, 8), Direction::North));
    let mut sim = Simulation::new(config, Box::new(always(Direction::West)), Box::new(Idle))
        .expect("valid config");

    sim.tick();
    assert_eq!(sim.agent(Side::Red).pos, pos(12, 20));
    assert_eq!(sim.agent(Side::Red).heading, Direction::East.heading(4));
    assert!(!sim.log().iter().any(|event| matches!(event, MatchEvent::Turned { .. })));
}

#[test]
fn pilot_turn_applies_before_the_advance() {
    let config = arena(40, 4, (pos(8, 20), Direction::East), (pos(28, 8), Direction::North));
    let mut sim = Simulation::new(config, Box::new(always(Direction::North)), Box::new(Idle))
        .expect("valid config");

    sim.tick();
    assert_eq!(sim.agent(Side::Red).pos, pos(8, 24));
    assert_eq!(
        sim.log().first(),
        Some(&MatchEvent::Turned { tick: 0, side: Side::Red, direction: Direction::North })
    );
    assert_eq!(sim.journal().ticks[0].red, Some(Direction::North));
}

#[test]
fn malformed_network_output_counts_as_no_move() {
    let config = arena(40, 4, (pos(8, 20), Direction::East), (pos(28, 8), Direction::North));
    let mut sim =
        Simulation::new(config, Box::new(NetworkPilot::new(Broken)), Box::new(Idle)).unwrap();

    assert_eq!(sim.tick(), GameState::Ongoing);
    assert_eq!(sim.agent(Side::Red).pos, pos(12, 20));
    let reason = DecisionError::WrongArity { expected: 4, got: 3 }.to_string();
    let malformed = MatchEvent::MalformedDecision { tick: 0, side: Side::Red, reason };
    assert!(sim.log().contains(&malformed));
    assert_eq!(sim.journal().ticks[0].red, None);
}

#[test]
fn outside_steering_is_applied_and_journaled() {
    let config = arena(40, 4, (pos(8, 20), Direction::East), (pos(28, 8), Direction::North));
    let mut sim = idle_match(config);

    assert!(sim.steer(Side::Blue, Direction::West));
    assert!(!sim.steer(Side::Blue, Direction::East));
    sim.tick();
    assert_eq!(sim.agent(Side::Blue).pos, pos(24, 8));
    let record = &sim.journal().ticks[0];
    assert_eq!(record.steers.len(), 2);
    assert_eq!(record.steers[0].direction, Direction::West);
}

#[test]
fn two_pressed_network_outputs_make_one_turn() {
    let config = arena(40, 4, (pos(8, 20), Direction::East), (pos(28, 8), Direction::North));
    // North and west both pressed; only the stronger north reaches the turn rule.
    let network = Pressed(vec![0.9, 0.0, 0.6, 0.0]);
    let mut sim =
        Simulation::new(config, Box::new(NetworkPilot::new(network)), Box::new(Idle)).unwrap();

    sim.tick();
    assert_eq!(sim.agent(Side::Red).heading, Direction::North.heading(4));
    assert_eq!(sim.agent(Side::Red).pos, pos(8, 24));
    assert_eq!(sim.journal().ticks[0].red, Some(Direction::North));
}

#[test]
fn relay_requests_only_the_newest_press_per_tick() {
    let config = arena(40, 4, (pos(8, 20), Direction::East), (pos(28, 8), Direction::North));
    let (keys, relay) = Relay::channel();
    let mut sim = Simulation::new(config, Box::new(relay), Box::new(Idle)).unwrap();

    keys.send(Direction::North).unwrap();
    keys.send(Direction::West).unwrap();
    sim.tick();
    // West alone is a reversal of east and is ignored.
    assert_eq!(sim.agent(Side::Red).heading, Direction::East.heading(4));
    assert_eq!(sim.agent(Side::Red).pos, pos(12, 20));
}

#[test]
fn steering_each_press_chains_turns_within_a_tick() {
    let config = arena(40, 4, (pos(8, 20), Direction::East), (pos(28, 8), Direction::North));
    let mut sim = idle_match(config);

    assert!(sim.steer(Side::Red, Direction::North));
    assert!(sim.steer(Side::Red, Direction::West));
    sim.tick();
    assert_eq!(sim.agent(Side::Red).pos, pos(4, 20));
}
