use rayon::prelude::*;

use crate::grid::LifeGrid;
use crate::neighbors::{Boundary, count_alive_neighbors_with};
use crate::rule::Rule;

/// One Conway generation with dead edges.
pub fn step(grid: &LifeGrid) -> LifeGrid {
    step_with(grid, Rule::CONWAY, Boundary::Dead)
}

/// One synchronous generation. Every cell reads only `grid`; results land in
/// a fresh grid, one row per worker.
pub fn step_with(grid: &LifeGrid, rule: Rule, boundary: Boundary) -> LifeGrid {
    let w = grid.width();
    let mut next = grid.clone();

    next.as_mut_slice()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let n = count_alive_neighbors_with(grid, x, y, boundary);
                *out = rule.next(grid.cell(x, y), n);
            }
        });

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::count_alive_neighbors;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Straight-line reference: same rule, no parallelism, checked access.
    fn naive_step(grid: &LifeGrid) -> LifeGrid {
        LifeGrid::from_fn(grid.width(), grid.height(), |x, y| {
            let n = count_alive_neighbors(grid, x, y);
            let alive = grid.get(x, y).unwrap();
            match (alive, n) {
                (true, 2) | (true, 3) => true,
                (false, 3) => true,
                _ => false,
            }
        })
        .unwrap()
    }

    fn arb_grid() -> impl Strategy<Value = LifeGrid> {
        (1..24usize, 1..24usize).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<bool>(), w * h).prop_map(move |cells| {
                LifeGrid::from_fn(w, h, |x, y| cells[y * w + x]).unwrap()
            })
        })
    }

    #[test]
    fn lone_cell_dies() {
        let g = LifeGrid::from_rows(&["O"]).unwrap();
        assert_eq!(step(&g).population(), 0);
    }

    #[test]
    fn block_is_still() {
        let g = LifeGrid::from_rows(&["....", ".OO.", ".OO.", "...."]).unwrap();
        assert_eq!(step(&g), g);
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = LifeGrid::from_rows(&[".....", ".....", ".OOO.", ".....", "....."]).unwrap();
        let vertical = LifeGrid::from_rows(&[".....", "..O..", "..O..", "..O..", "....."]).unwrap();
        let once = step(&horizontal);
        assert_eq!(once, vertical);
        assert_eq!(step(&once), horizontal);
    }

    #[test]
    fn update_is_synchronous() {
        // Updating in place would kill (0, 0) before (1, 1) counts it.
        let g = LifeGrid::from_rows(&["O.O", "...", "O.."]).unwrap();
        let expected = LifeGrid::from_rows(&["...", ".O.", "..."]).unwrap();
        assert_eq!(step(&g), expected);
        assert_eq!(naive_step(&g), expected);
    }

    #[test]
    fn glider_wraps_on_torus() {
        let g = LifeGrid::from_rows(&[
            ".O......", "..O.....", "OOO.....", "........",
            "........", "........", "........", "........",
        ])
        .unwrap();
        let mut cur = g.clone();
        for _ in 0..32 {
            cur = step_with(&cur, Rule::CONWAY, Boundary::Torus);
        }
        // A glider moves one cell diagonally every 4 generations.
        assert_eq!(cur, g);
    }

    #[test]
    fn other_rules_apply() {
        let highlife: Rule = "B36/S23".parse().unwrap();
        let g = LifeGrid::from_rows(&["OOO", "O.O", "O.."]).unwrap();
        // Center has 6 alive neighbors: born under HighLife, not under Conway.
        assert!(step_with(&g, highlife, Boundary::Dead).cell(1, 1));
        assert!(!step(&g).cell(1, 1));
    }

    proptest! {
        #[test]
        fn matches_naive_reference(g in arb_grid()) {
            prop_assert_eq!(step(&g), naive_step(&g));
        }

        #[test]
        fn deterministic_and_same_size(g in arb_grid()) {
            let a = step(&g);
            let b = step(&g);
            prop_assert_eq!(a.width(), g.width());
            prop_assert_eq!(a.height(), g.height());
            prop_assert_eq!(a, b);
        }
    }
}
