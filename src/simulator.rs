use crate::grid::LifeGrid;
use crate::neighbors::Boundary;
use crate::rule::Rule;
use crate::step::step_with;

/// Rule and edge policy for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Simulator {
    pub rule: Rule,
    pub boundary: Boundary,
}

impl Simulator {
    pub fn new(rule: Rule, boundary: Boundary) -> Self {
        Self { rule, boundary }
    }

    /// Frame 0 is `initial`; frame i is `initial` advanced i generations.
    /// Always returns `iterations + 1` frames.
    pub fn run(&self, initial: LifeGrid, iterations: usize) -> Vec<LifeGrid> {
        let mut frames = Vec::new();
        let mut cur = initial;
        for _ in 0..iterations {
            let next = step_with(&cur, self.rule, self.boundary);
            frames.push(cur);
            cur = next;
        }
        frames.push(cur);
        frames
    }

    /// Unbounded lazy stream of generations starting with `initial`.
    /// Each generation is computed only when requested.
    pub fn generations(&self, initial: LifeGrid) -> Generations {
        Generations {
            sim: *self,
            pending: Some(initial),
            last: None,
        }
    }
}

/// Conway rules with dead edges.
pub fn run(initial: LifeGrid, iterations: usize) -> Vec<LifeGrid> {
    Simulator::default().run(initial, iterations)
}

pub struct Generations {
    sim: Simulator,
    pending: Option<LifeGrid>,
    last: Option<LifeGrid>,
}

impl Iterator for Generations {
    type Item = LifeGrid;

    fn next(&mut self) -> Option<LifeGrid> {
        let cur = match self.pending.take() {
            Some(initial) => initial,
            None => step_with(self.last.as_ref()?, self.sim.rule, self.sim.boundary),
        };
        self.last = Some(cur.clone());
        Some(cur)
    }
}
