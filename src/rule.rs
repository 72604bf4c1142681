use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Outer-totalistic Life-like rule. Bit `n` of a mask is set when a cell
/// with `n` alive neighbors is born (dead) or survives (alive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    birth: u16,
    survival: u16,
}

type NeighborMask = u16;

impl Rule {
    /// Conway's Game of Life, B3/S23.
    pub const CONWAY: Rule = Rule {
        birth: 0b0_0000_1000,
        survival: 0b0_0000_1100,
    };

    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            birth: mask(birth)?,
            survival: mask(survival)?,
        })
    }

    /// Next state of a cell given its current state and alive-neighbor count.
    #[inline]
    pub fn next(&self, alive: bool, neighbors: u8) -> bool {
        let m = if alive { self.survival } else { self.birth };
        (m >> neighbors) & 1 != 0
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::CONWAY
    }
}

fn mask(counts: &[u8]) -> Result<NeighborMask, Error> {
    counts.iter().try_fold(0, |m, &n| {
        if n > 8 {
            Err(Error::ParseRule(format!("neighbor count {} exceeds 8", n)))
        } else {
            Ok(m | 1 << n)
        }
    })
}

fn write_mask(f: &mut fmt::Formatter, mut m: NeighborMask) -> fmt::Result {
    while m != 0 {
        write!(f, "{}", m.trailing_zeros())?;
        m &= m - 1;
    }
    Ok(())
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "B")?;
        write_mask(f, self.birth)?;
        write!(f, "/S")?;
        write_mask(f, self.survival)
    }
}

impl FromStr for Rule {
    type Err = Error;

    /// Parses `B3/S23` notation. The halves may come in either order.
    fn from_str(s: &str) -> Result<Self, Error> {
        let bad = || Error::ParseRule(s.to_string());
        let (a, b) = s.trim().split_once('/').ok_or_else(bad)?;
        let mut birth = None;
        let mut survival = None;
        for part in [a, b] {
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(bad()),
            };
            if slot.is_some() {
                return Err(bad());
            }
            let digits = chars
                .map(|c| c.to_digit(10).map(|d| d as u8).ok_or_else(bad))
                .collect::<Result<Vec<u8>, Error>>()?;
            *slot = Some(mask(&digits)?);
        }
        Ok(Rule {
            birth: birth.ok_or_else(bad)?,
            survival: survival.ok_or_else(bad)?,
        })
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
