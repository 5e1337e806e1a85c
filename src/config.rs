//! Belt configuration.
//!
//! The prototype builds of this widget disagreed on the numeric constants
//! (belt speed, spawn cadence, where boxes leave the screen), so every such
//! knob is a named field here rather than a literal buried in the tick loop.

use serde::{Deserialize, Serialize};

use crate::error::BeltError;

/// Construction-time configuration for a [`crate::BeltController`].
///
/// All fields are validated once, at construction; a controller is never
/// built from an invalid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeltConfig {
    /// Horizontal advance per tick, in pixels. Must be positive.
    pub speed: f32,
    /// Milliseconds between spawns. Must be positive.
    pub spawn_interval_ms: u64,
    /// Position at which an object has left the visible span and is
    /// evicted. Must be positive.
    pub exit_threshold: f32,
    /// How long the presentation layer shows a resolved prize before the
    /// host calls `on_display_window_elapsed`. Must be positive.
    pub display_duration_ms: u64,
    /// Where new objects enter the belt. May be negative (off-screen).
    pub entry_position: f32,
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            speed: 2.5,
            spawn_interval_ms: 1300,
            exit_threshold: 550.0,
            display_duration_ms: 3000,
            entry_position: -60.0,
        }
    }
}

impl BeltConfig {
    /// Check every field, reporting the first offender.
    ///
    /// A zero or negative speed/threshold would stall the belt forever; a
    /// zero spawn interval would spawn on every tick without bound. NaN
    /// fails the positivity checks as well.
    pub fn validate(&self) -> Result<(), BeltError> {
        if !(self.speed > 0.0) {
            return Err(BeltError::InvalidConfig(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if self.spawn_interval_ms == 0 {
            return Err(BeltError::InvalidConfig(
                "spawn_interval_ms must be positive".into(),
            ));
        }
        if !(self.exit_threshold > 0.0) {
            return Err(BeltError::InvalidConfig(format!(
                "exit_threshold must be positive, got {}",
                self.exit_threshold
            )));
        }
        if self.display_duration_ms == 0 {
            return Err(BeltError::InvalidConfig(
                "display_duration_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}
