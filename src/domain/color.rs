//! Node colors and the random source that assigns them.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// RGB color; every channel is in `0..=255` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Supplies a color for each node as it is inserted.
pub trait ColorSource: Send {
    fn next_color(&mut self) -> Rgb;
}

/// Uniformly random colors.
#[derive(Debug, Clone)]
pub struct RandomColors {
    rng: SmallRng,
}

impl RandomColors {
    pub fn from_os_rng() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic sequence for reproducible output and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded if a seed is given, otherwise seeded from the OS.
    pub fn with_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os_rng, Self::seeded)
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> Rgb {
        Rgb(self.rng.random(), self.rng.random(), self.rng.random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RandomColors::seeded(7);
        let mut b = RandomColors::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Rgb(255, 0, 16).to_string(), "#ff0010");
    }
}
