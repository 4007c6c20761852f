//! End-to-end match scenarios on small arenas.

use lightcycle_core::{
    AgentState, Direction, FitnessFn, FitnessScores, FitnessStrategy, GameState, Grid, Idle,
    MatchConfig, MatchSummary, Pos, Side, Simulation, perception::perceive,
};

fn config(red: (Pos, Direction), blue: (Pos, Direction)) -> MatchConfig {
    MatchConfig {
        red_start: red.0,
        red_heading: red.1,
        blue_start: blue.0,
        blue_heading: blue.1,
        ..MatchConfig::with_grid(100, 4)
    }
}

#[test]
fn heads_travel_one_step_per_tick_toward_each_other() {
    let config = config(
        (Pos { x: 20, y: 48 }, Direction::East),
        (Pos { x: 76, y: 52 }, Direction::West),
    );
    let mut sim = Simulation::new(config, Box::new(Idle), Box::new(Idle)).unwrap();

    for _ in 0..7 {
        assert_eq!(sim.tick(), GameState::Ongoing);
    }
    let red = sim.agent(Side::Red).pos;
    let blue = sim.agent(Side::Blue).pos;
    assert_eq!(red.x - 20, 28);
    assert_eq!(76 - blue.x, 28);
    assert_eq!(sim.state(), GameState::Ongoing);
}

#[test]
fn same_row_heads_collide_head_on_when_the_gap_closes() {
    let config = config(
        (Pos { x: 20, y: 48 }, Direction::East),
        (Pos { x: 76, y: 48 }, Direction::West),
    );
    let mut sim = Simulation::new(config, Box::new(Idle), Box::new(Idle)).unwrap();

    for _ in 0..6 {
        assert_eq!(sim.tick(), GameState::Ongoing);
    }
    assert_eq!(sim.agent(Side::Blue).pos.x - sim.agent(Side::Red).pos.x, 8);
    assert_eq!(sim.tick(), GameState::Tie);
}

#[test]
fn driving_into_the_border_loses_on_the_border_cell() {
    let config = config(
        (Pos { x: 4, y: 48 }, Direction::West),
        (Pos { x: 76, y: 48 }, Direction::North),
    );
    let mut sim = Simulation::new(config, Box::new(Idle), Box::new(Idle)).unwrap();

    assert_eq!(sim.run_to_completion(), GameState::BlueWon);
    assert_eq!(sim.result().unwrap().red_pos, Pos { x: 0, y: 48 });
}

#[test]
fn landing_on_the_same_cell_ties_regardless_of_trails() {
    let config = config(
        (Pos { x: 40, y: 40 }, Direction::North),
        (Pos { x: 48, y: 48 }, Direction::West),
    );
    let mut sim = Simulation::new(config, Box::new(Idle), Box::new(Idle)).unwrap();

    // Red: (40,44) then (40,48). Blue: (44,48) then (40,48).
    assert_eq!(sim.tick(), GameState::Ongoing);
    assert_eq!(sim.tick(), GameState::Tie);
    let result = sim.result().unwrap();
    assert_eq!(result.red_pos, result.blue_pos);
    assert_eq!(result.scores, FitnessScores { red: -50.0, blue: -50.0 });
}

#[test]
fn obstacle_beyond_two_open_cells_reads_as_two_thirds() {
    let mut grid = Grid::new(100, 4);
    grid.mark_occupied(Pos { x: 48, y: 60 }, Side::Blue);
    let own = AgentState::new(Pos { x: 48, y: 48 }, Direction::East, 4);
    let opponent = AgentState::new(Pos { x: 20, y: 20 }, Direction::West, 4);

    let percept = perceive(&grid, &own, &opponent, 3);
    assert_eq!(percept.clearance(Direction::North), 2.0 / 3.0);
}

#[test]
fn basic_fitness_pays_bonus_plus_ticks_to_the_winner() {
    let config = MatchConfig {
        fitness: FitnessStrategy::Basic { win_bonus: 300.0, tie_penalty: 10.0 },
        ..MatchConfig::default()
    };
    let summary = MatchSummary {
        state: GameState::RedWon,
        ticks: 42,
        red_pos: Pos { x: 100, y: 100 },
        blue_pos: Pos { x: 0, y: 100 },
    };
    let scores = config.fitness.score(&config, &summary);
    assert_eq!(scores, FitnessScores { red: 342.0, blue: 42.0 });
}
