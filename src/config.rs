//! Engine configuration
//!
//! Fixed at engine construction. Persisted separately in LocalStorage on web.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How per-tick constants map onto wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimingMode {
    /// Gravity and spawn chance apply once per presented frame.
    /// Game speed follows the display refresh rate.
    #[default]
    PerFrame,
    /// Constants are scaled by frame delta so a tick at `reference_hz`
    /// behaves like one `PerFrame` tick.
    PerSecond { reference_hz: f32 },
}

impl TimingMode {
    /// Delta-time scaling against the nominal 60 Hz
    pub fn per_second() -> Self {
        TimingMode::PerSecond {
            reference_hz: REFERENCE_HZ,
        }
    }

    /// Number of reference ticks a frame of `dt` seconds is worth
    pub fn tick_scale(&self, dt: f32) -> f32 {
        match *self {
            TimingMode::PerFrame => 1.0,
            TimingMode::PerSecond { reference_hz } => {
                let dt = if dt.is_finite() { dt } else { MIN_DT };
                reference_hz * dt.clamp(MIN_DT, MAX_DT)
            }
        }
    }
}

/// Invalid configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
    #[error("catch tolerance {tolerance} leaves no catch window")]
    EmptyCatchWindow { tolerance: f32 },
}

/// Catch engine tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Score that ends the game
    pub target_score: u32,
    /// Vertical displacement per tick
    pub gravity: f32,
    /// Chance per tick of a spawn
    pub spawn_chance: f32,
    /// Chance a spawned item is beneficial
    pub beneficial_bias: f32,

    pub hook_width: f32,
    pub hook_height: f32,
    /// Distance from hook bottom to playfield bottom
    pub hook_margin: f32,
    pub item_size: f32,
    pub catch_tolerance: f32,

    /// Penalty toast lifetime (ms)
    pub warning_ms: f64,
    pub warning_text: String,

    pub timing: TimingMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_score: GOAL_SCORE,
            gravity: GRAVITY,
            spawn_chance: SPAWN_RATE,
            beneficial_bias: BENEFICIAL_BIAS,

            hook_width: HOOK_WIDTH,
            hook_height: HOOK_HEIGHT,
            hook_margin: HOOK_MARGIN,
            item_size: ITEM_SIZE,
            catch_tolerance: CATCH_TOLERANCE,

            warning_ms: WARNING_MS,
            warning_text: WARNING_TEXT.to_string(),

            timing: TimingMode::PerFrame,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("spawn_chance", self.spawn_chance),
            ("beneficial_bias", self.beneficial_bias),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if self.target_score == 0 {
            return Err(ConfigError::NonPositive {
                field: "target_score",
            });
        }

        for (field, value) in [
            ("gravity", self.gravity),
            ("hook_width", self.hook_width),
            ("hook_height", self.hook_height),
            ("item_size", self.item_size),
        ] {
            // Also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field });
            }
        }

        if !(self.hook_margin >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "hook_margin",
            });
        }

        if !(self.warning_ms > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "warning_ms",
            });
        }

        if let TimingMode::PerSecond { reference_hz } = self.timing {
            if !(reference_hz > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "reference_hz",
                });
            }
        }

        let tolerance = self.catch_tolerance;
        let narrowest = self.hook_width.min(self.hook_height) / 2.0 + self.item_size / 2.0;
        if !(tolerance >= 0.0) || tolerance >= narrowest {
            return Err(ConfigError::EmptyCatchWindow { tolerance });
        }

        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "heart_hook_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
