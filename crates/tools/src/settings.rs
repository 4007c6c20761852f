//! Match configuration files. Every key is optional; omitted start cells
//! are derived from the configured arena rather than the default one.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lightcycle_core::config::{DEFAULT_GRID_SIZE, DEFAULT_SPEED};
use lightcycle_core::{Direction, FitnessStrategy, MatchConfig, Pos};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    grid_size: Option<u32>,
    speed: Option<u32>,
    sight_radius: Option<u32>,
    red_start: Option<Pos>,
    blue_start: Option<Pos>,
    red_heading: Option<Direction>,
    blue_heading: Option<Direction>,
    tick_ceiling: Option<u64>,
    fitness: Option<FitnessStrategy>,
}

impl ConfigFile {
    fn into_config(self) -> MatchConfig {
        let base = MatchConfig::with_grid(
            self.grid_size.unwrap_or(DEFAULT_GRID_SIZE),
            self.speed.unwrap_or(DEFAULT_SPEED),
        );
        MatchConfig {
            sight_radius: self.sight_radius.unwrap_or(base.sight_radius),
            red_start: self.red_start.unwrap_or(base.red_start),
            blue_start: self.blue_start.unwrap_or(base.blue_start),
            red_heading: self.red_heading.unwrap_or(base.red_heading),
            blue_heading: self.blue_heading.unwrap_or(base.blue_heading),
            tick_ceiling: self.tick_ceiling.or(base.tick_ceiling),
            fitness: self.fitness.unwrap_or(base.fitness),
            ..base
        }
    }
}

pub fn parse_config(text: &str) -> Result<MatchConfig> {
    let file: ConfigFile = toml::from_str(text).context("failed to parse match config TOML")?;
    let config = file.into_config();
    config.validate().context("match config is invalid")?;
    Ok(config)
}

pub fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    let Some(path) = path else {
        return Ok(MatchConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in config file {}", path.display()))
}
