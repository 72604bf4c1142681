use image::RgbImage;

use crate::error::{Error, Result};
use crate::rng::Rng;

/// Luminance at or above which an image pixel becomes a live cell.
pub const DEFAULT_THRESHOLD: u8 = 126;

/// Row-major flat grid. No per-cell objects.
/// Dimensions are fixed at construction and always positive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    data: Vec<T>,
    w: usize,
    h: usize,
}

/// The automaton's state: `true` is alive.
pub type LifeGrid = Grid<bool>;

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Result<Self> {
        let invalid = Error::InvalidDimensions { width: w, height: h };
        if w == 0 || h == 0 {
            return Err(invalid);
        }
        let len = w.checked_mul(h).ok_or(invalid)?;
        Ok(Self {
            data: vec![T::default(); len],
            w,
            h,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let mut grid = Self::new(w, h)?;
        for y in 0..h {
            for x in 0..w {
                grid.data[y * w + x] = f(x, y);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.w as u64 && (y as u64) < self.h as u64
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    /// Unchecked read for inner loops that already range-checked.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    pub fn get(&self, x: usize, y: usize) -> Result<T> {
        self.check(x, y)?;
        Ok(self.cell(x, y))
    }

    pub fn set(&mut self, x: usize, y: usize, v: T) -> Result<()> {
        self.check(x, y)?;
        let i = self.idx(x, y);
        self.data[i] = v;
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the backing rows. Length never changes.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn check(&self, x: usize, y: usize) -> Result<()> {
        if x < self.w && y < self.h {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width: self.w,
                height: self.h,
            })
        }
    }
}

impl LifeGrid {
    /// Threshold an RGB image: a pixel is alive iff `(r + g + b) / 3 >= threshold`.
    pub fn from_image(img: &RgbImage, threshold: u8) -> Result<Self> {
        let limit = 3 * threshold as u32;
        Self::from_fn(img.width() as usize, img.height() as usize, |x, y| {
            let [r, g, b] = img.get_pixel(x as u32, y as u32).0;
            r as u32 + g as u32 + b as u32 >= limit
        })
    }

    /// Each cell independently alive with probability `alive_probability`.
    pub fn random(w: usize, h: usize, alive_probability: f32, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alive_probability) {
            return Err(Error::InvalidProbability(alive_probability));
        }
        let mut rng = Rng::new(seed);
        Self::from_fn(w, h, |_, _| rng.chance(alive_probability))
    }

    /// Plaintext pattern, one string per row. `O`, `#`, `*` and `1` are alive.
    /// Short rows are padded with dead cells.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let w = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let cells: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| matches!(c, 'O' | '#' | '*' | '1')).collect())
            .collect();
        Self::from_fn(w, rows.len(), |x, y| cells[y].get(x).copied().unwrap_or(false))
    }

    pub fn population(&self) -> usize {
        self.data.iter().filter(|&&c| c).count()
    }
}

/// Resolve a possibly off-grid coordinate. Returns None outside the grid.
#[inline]
pub fn bounded_xy(x: i64, y: i64, w: usize, h: usize) -> Option<(usize, usize)> {
    if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
        return None;
    }
    Some((x as usize, y as usize))
}

/// Wrap both axes (toroidal topology).
#[inline]
pub fn wrap_xy(x: i64, y: i64, w: usize, h: usize) -> (usize, usize) {
    (x.rem_euclid(w as i64) as usize, y.rem_euclid(h as i64) as usize)
}
