use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{LifeGrid, bounded_xy, wrap_xy};

/// How probes past the grid edge are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Off-grid cells are permanently dead.
    #[default]
    Dead,
    /// Both axes wrap around.
    Torus,
}

const MOORE: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Alive cells among the 8 neighbors of `(x, y)`; off-grid neighbors are dead.
#[inline]
pub fn count_alive_neighbors(grid: &LifeGrid, x: usize, y: usize) -> u8 {
    count_alive_neighbors_with(grid, x, y, Boundary::Dead)
}

/// Neighbor count under an explicit boundary policy. `(x, y)` must be on the grid.
#[inline]
pub fn count_alive_neighbors_with(grid: &LifeGrid, x: usize, y: usize, boundary: Boundary) -> u8 {
    let (w, h) = (grid.width(), grid.height());
    let mut n = 0;
    for (dx, dy) in MOORE {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        let pos = match boundary {
            Boundary::Dead => bounded_xy(nx, ny, w, h),
            Boundary::Torus => Some(wrap_xy(nx, ny, w, h)),
        };
        if let Some((px, py)) = pos {
            n += grid.cell(px, py) as u8;
        }
    }
    n
}

/// Checked variant for callers holding untrusted coordinates.
pub fn try_count_alive_neighbors(grid: &LifeGrid, x: i64, y: i64, boundary: Boundary) -> Result<u8> {
    if !grid.contains(x, y) {
        return Err(Error::OutOfBounds {
            x,
            y,
            width: grid.width(),
            height: grid.height(),
        });
    }
    Ok(count_alive_neighbors_with(grid, x as usize, y as usize, boundary))
}
