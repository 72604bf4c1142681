use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::grid::DEFAULT_THRESHOLD;
use crate::neighbors::Boundary;
use crate::rule::Rule;
use crate::seed::InitialState;

/// All tunable parameters. The server accepts any subset as JSON.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Params {
    // Run
    pub iterations: usize,
    pub rule: Rule,
    pub boundary: Boundary,

    // Random initial state
    pub width: usize,
    pub height: usize,
    pub alive_probability: f32,
    pub seed: u64,

    // Image initial state
    pub threshold: u8,

    // Output
    pub delay_ms: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            iterations: 50,
            rule: Rule::CONWAY,
            boundary: Boundary::Dead,
            width: 100,
            height: 100,
            alive_probability: 0.2,
            seed: 42,
            threshold: DEFAULT_THRESHOLD,
            delay_ms: 100,
        }
    }
}

impl Params {
    pub fn random_state(&self) -> InitialState {
        InitialState::Random {
            width: self.width,
            height: self.height,
            alive_probability: self.alive_probability,
            seed: self.seed,
        }
    }

    pub fn image_state(&self, path: impl Into<PathBuf>) -> InitialState {
        InitialState::FromImage {
            path: path.into(),
            threshold: self.threshold,
        }
    }
}

/// Upper bound on cycles accepted by the pipeline.
pub const MAX_ITERATIONS: usize = 100_000;

/// Parse a user-supplied cycle count. Must be an integer greater than zero.
pub fn parse_iterations(s: &str) -> Result<usize> {
    match s.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n as usize),
        _ => Err(Error::InvalidIterationCount(s.to_string())),
    }
}
