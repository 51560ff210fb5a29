//! Zoom level of the grid canvas.

use crate::config::ZoomConfig;
use serde::{Deserialize, Serialize};

/// A zoom level kept within configured limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zoom {
    level: f64,
    limits: ZoomConfig,
}

impl Zoom {
    pub fn new(limits: ZoomConfig) -> Self {
        let level = limits.default.max(limits.min).min(limits.max);
        Self { level, limits }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Level as a whole percentage, e.g. `110` for 1.1.
    pub fn percent(&self) -> u32 {
        (self.level * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set(self.level + self.limits.step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set(self.level - self.limits.step)
    }

    pub fn reset(&mut self) -> f64 {
        self.set(self.limits.default)
    }

    /// Set the level, clamped to the limits. Returns the stored level.
    pub fn set(&mut self, level: f64) -> f64 {
        // Rounded to hundredths so repeated steps do not drift.
        let level = (level * 100.0).round() / 100.0;
        self.level = level.max(self.limits.min).min(self.limits.max);
        self.level
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}
