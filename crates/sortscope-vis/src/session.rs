//! Session configuration and random input arrays.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Smallest array the demo sorts.
pub const MIN_SIZE: usize = 5;
/// Largest array the demo sorts.
pub const MAX_SIZE: usize = 50;
/// Slowest playback speed.
pub const MIN_SPEED: u32 = 10;
/// Fastest playback speed.
pub const MAX_SPEED: u32 = 200;

/// Floor on the delay between steps, in milliseconds.
pub const MIN_INTERVAL_MS: u64 = 50;

/// Range of generated values (inclusive).
pub const VALUE_RANGE: std::ops::RangeInclusive<i64> = 1..=100;

/// Array size and playback speed for a session.
///
/// Both values are clamped on construction, so a `SessionConfig` is always
/// in range by the time it reaches the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    size: usize,
    speed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: 20,
            speed: 100,
        }
    }
}

impl SessionConfig {
    /// Create a config, clamping `size` to [5, 50] and `speed` to [10, 200].
    pub fn new(size: usize, speed: u32) -> Self {
        Self {
            size: size.clamp(MIN_SIZE, MAX_SIZE),
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
        }
    }

    /// Number of elements in generated arrays.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Playback speed setting.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Copy with a new (clamped) size.
    #[must_use]
    pub fn with_size(self, size: usize) -> Self {
        Self::new(size, self.speed)
    }

    /// Copy with a new (clamped) speed.
    #[must_use]
    pub fn with_speed(self, speed: u32) -> Self {
        Self::new(self.size, speed)
    }

    /// Apply a partial update.
    #[must_use]
    pub fn apply(self, update: ConfigUpdate) -> Self {
        Self::new(
            update.size.unwrap_or(self.size),
            update.speed.unwrap_or(self.speed),
        )
    }

    /// Delay between steps: `max(50, 1000 - speed * 8)` milliseconds.
    pub fn tick_interval(&self) -> Duration {
        let ms = 1000i64 - i64::from(self.speed) * 8;
        Duration::from_millis((ms.max(0) as u64).max(MIN_INTERVAL_MS))
    }
}

/// Partial configuration change requested by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub speed: Option<u32>,
}

/// Source of random input arrays.
#[derive(Debug)]
pub struct InputSource {
    rng: StdRng,
}

impl InputSource {
    /// Deterministic source for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A fresh array of `size` values drawn from [`VALUE_RANGE`].
    pub fn generate(&mut self, size: usize) -> Vec<i64> {
        (0..size).map(|_| self.rng.gen_range(VALUE_RANGE)).collect()
    }
}

impl Default for InputSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
