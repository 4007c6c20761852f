use crate::{
    config::ConfigError,
    journal::{DecisionJournal, JOURNAL_FORMAT_VERSION},
    pilot::Scripted,
    simulation::Simulation,
    types::{GameState, Side},
};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    UnsupportedFormat(u16),
    InvalidConfig(ConfigError),
    /// The match ended before every recorded tick was used.
    TrailingInput { tick: u64 },
    /// The records ran out while the match was still ongoing.
    MissingInput,
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_state: GameState,
    pub final_snapshot_hash: u64,
    pub final_tick: u64,
}

pub fn replay_to_end(journal: &DecisionJournal) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormat(journal.format_version));
    }
    let mut sim = Simulation::new(
        journal.config.clone(),
        Box::new(Scripted::new(journal.moves(Side::Red))),
        Box::new(Scripted::new(journal.moves(Side::Blue))),
    )
    .map_err(ReplayError::InvalidConfig)?;

    for record in &journal.ticks {
        if sim.state().is_terminal() {
            return Err(ReplayError::TrailingInput { tick: record.tick });
        }
        for steer in &record.steers {
            sim.steer(steer.side, steer.direction);
        }
        sim.tick();
    }

    if !sim.state().is_terminal() {
        if !journal.aborted {
            return Err(ReplayError::MissingInput);
        }
        for steer in &journal.trailing_steers {
            sim.steer(steer.side, steer.direction);
        }
        sim.abort();
    }

    Ok(ReplayResult {
        final_state: sim.state(),
        final_snapshot_hash: sim.snapshot_hash(),
        final_tick: sim.current_tick(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::pilot::Wanderer;
    use crate::types::Direction;

    fn small_config() -> MatchConfig {
        MatchConfig { tick_ceiling: Some(400), ..MatchConfig::with_grid(80, 4) }
    }

    #[test]
    fn replay_reproduces_wandering_match() {
        let mut sim = Simulation::new(
            small_config(),
            Box::new(Wanderer::new(11, 30)),
            Box::new(Wanderer::new(29, 30)),
        )
        .unwrap();
        sim.run_to_completion();

        let replayed = replay_to_end(sim.journal()).unwrap();
        assert_eq!(replayed.final_state, sim.state());
        assert_eq!(replayed.final_tick, sim.current_tick());
        assert_eq!(replayed.final_snapshot_hash, sim.snapshot_hash());
    }

    #[test]
    fn replay_honors_outside_steering() {
        let config = small_config();
        let mut sim = Simulation::new(
            config,
            Box::new(Wanderer::new(5, 10)),
            Box::new(Wanderer::new(6, 10)),
        )
        .unwrap();
        sim.tick();
        sim.steer(Side::Red, Direction::North);
        sim.tick();
        sim.steer(Side::Blue, Direction::South);
        sim.run_to_completion();

        let journal = DecisionJournal::from_json(&sim.journal().to_json().unwrap()).unwrap();
        let replayed = replay_to_end(&journal).unwrap();
        assert_eq!(replayed.final_snapshot_hash, sim.snapshot_hash());
    }

    #[test]
    fn replay_rejects_truncated_journal() {
        let mut sim = Simulation::new(
            small_config(),
            Box::new(Wanderer::new(1, 20)),
            Box::new(Wanderer::new(2, 20)),
        )
        .unwrap();
        for _ in 0..3 {
            sim.tick();
        }
        assert!(!sim.state().is_terminal());
        assert_eq!(replay_to_end(sim.journal()), Err(ReplayError::MissingInput));
    }

    #[test]
    fn replay_rejects_records_after_the_end() {
        let mut sim = Simulation::new(
            small_config(),
            Box::new(Wanderer::new(1, 20)),
            Box::new(Wanderer::new(2, 20)),
        )
        .unwrap();
        sim.run_to_completion();
        let mut journal = sim.journal().clone();
        journal.aborted = false;
        let extra = journal.ticks.last().cloned().unwrap_or_default();
        journal.ticks.push(extra);
        assert!(matches!(replay_to_end(&journal), Err(ReplayError::TrailingInput { .. })));
    }

    #[test]
    fn replay_rejects_unknown_format() {
        let mut journal = DecisionJournal::new(small_config());
        journal.format_version = 99;
        assert_eq!(replay_to_end(&journal), Err(ReplayError::UnsupportedFormat(99)));
    }
}
