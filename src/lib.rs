pub mod config;
pub mod error;
pub mod grid;
pub mod neighbors;
pub mod render;
pub mod rng;
pub mod rule;
pub mod seed;
pub mod simulator;
pub mod step;

use std::time::Instant;

use log::{debug, info};

use config::{MAX_ITERATIONS, Params};
use error::{Error, Result};
use grid::LifeGrid;
use seed::InitialState;
use simulator::Simulator;

/// Rule summary printed at startup.
pub const RULES_TEXT: &str = "\
Rules:
\t1. Any live cell with fewer than two live neighbours dies, as if by underpopulation.
\t2. Any live cell with two or three live neighbours lives on to the next generation.
\t3. Any live cell with more than three live neighbours dies, as if by overpopulation.
\t4. Any dead cell with exactly three live neighbours becomes a live cell, as if by reproduction.
\t5. Each pixel is considered a cell, each cell has 8 neighbours.";

pub struct Animation {
    pub w: usize,
    pub h: usize,
    pub frames: Vec<LifeGrid>,
    pub gif: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Build generation 0 from `initial` and advance it `iterations` times
/// under Conway rules with dead edges. Returns `iterations + 1` frames.
pub fn simulate(initial: &InitialState, iterations: usize) -> Result<Vec<LifeGrid>> {
    Ok(simulator::run(initial.provide()?, iterations))
}

/// Full pipeline: initial state, simulation, GIF encoding.
pub fn generate(source: &InitialState, params: &Params) -> Result<(Animation, Vec<Timing>)> {
    if params.iterations == 0 || params.iterations > MAX_ITERATIONS {
        return Err(Error::InvalidIterationCount(params.iterations.to_string()));
    }

    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Initial state
    let t = Instant::now();
    let initial = source.provide()?;
    let (w, h) = (initial.width(), initial.height());
    timings.push(Timing {
        name: "initial_state",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Run the automaton
    let t = Instant::now();
    let frames = Simulator::new(params.rule, params.boundary).run(initial, params.iterations);
    timings.push(Timing {
        name: "simulate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Encode
    let t = Instant::now();
    let gif = render::encode_gif(&frames, params.delay_ms)?;
    timings.push(Timing {
        name: "encode_gif",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    for t in &timings {
        debug!("{:20} {:8.1} ms", t.name, t.ms);
    }
    info!(
        "{} source {}x{}, {} frames under {}, final population {}",
        source.label(),
        w,
        h,
        frames.len(),
        params.rule,
        frames.last().map_or(0, LifeGrid::population)
    );

    Ok((Animation { w, h, frames, gif }, timings))
}
