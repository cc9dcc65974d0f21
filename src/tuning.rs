//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can override it.
//! Missing fields fall back to the defaults from [`crate::consts`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Side length of the square torus
    pub grid_size: i32,
    /// Normal ticks per second
    pub tick_rate_hz: f64,
    /// Tick period multiplier while turbo is active
    pub turbo_multiplier: f64,
    /// How long turbo stays on (ms)
    pub turbo_duration_ms: f64,
    /// Minimum time between turbo activations (ms)
    pub turbo_cooldown_ms: f64,
    /// Score and growth awarded for the bonus block
    pub special_points: u32,
    /// Bonus block lifetime (ms)
    pub special_duration_ms: f64,
    /// Chance of a bonus spawn attempt after eating a normal fruit
    pub special_spawn_chance: f64,
    /// Random placements tried per bonus spawn attempt
    pub special_placement_attempts: u32,
    /// Snake glow after eating the bonus (ms)
    pub glow_duration_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tick_rate_hz: TICK_RATE_HZ,
            turbo_multiplier: TURBO_MULTIPLIER,
            turbo_duration_ms: TURBO_DURATION_MS,
            turbo_cooldown_ms: TURBO_COOLDOWN_MS,
            special_points: SPECIAL_POINTS,
            special_duration_ms: SPECIAL_DURATION_MS,
            special_spawn_chance: SPECIAL_SPAWN_CHANCE,
            special_placement_attempts: SPECIAL_PLACEMENT_ATTEMPTS,
            glow_duration_ms: GLOW_DURATION_MS,
        }
    }
}

impl Tuning {
    /// Tick period in ms, shortened while turbo is active (never below 1 ms)
    pub fn tick_interval_ms(&self, turbo_active: bool) -> f64 {
        let base = 1000.0 / self.tick_rate_hz;
        if turbo_active {
            (base * self.turbo_multiplier).max(1.0)
        } else {
            base
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        // The starting snake needs x = N/2 - 2 >= 0 and the bonus needs a 2x2 window
        if self.grid_size < 4 {
            return Err(TuningError::Invalid {
                field: "grid_size",
                reason: "must be at least 4",
            });
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(TuningError::Invalid {
                field: "grid_size",
                reason: "too large",
            });
        }
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(TuningError::Invalid {
                field: "tick_rate_hz",
                reason: "must be positive",
            });
        }
        if !(self.turbo_multiplier > 0.0 && self.turbo_multiplier <= 1.0) {
            return Err(TuningError::Invalid {
                field: "turbo_multiplier",
                reason: "must be in (0, 1]",
            });
        }
        let durations = [
            ("turbo_duration_ms", self.turbo_duration_ms),
            ("turbo_cooldown_ms", self.turbo_cooldown_ms),
            ("special_duration_ms", self.special_duration_ms),
            ("glow_duration_ms", self.glow_duration_ms),
        ];
        for (field, ms) in durations {
            if !ms.is_finite() || ms < 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite, non-negative duration",
                });
            }
        }
        if !(0.0..=1.0).contains(&self.special_spawn_chance) {
            return Err(TuningError::Invalid {
                field: "special_spawn_chance",
                reason: "must be a probability",
            });
        }
        Ok(())
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let text = fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}
