//! Heart Hook - a falling-object catch game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, catching, scoring)
//! - `config`: Engine configuration and validation
//! - `renderer`: Draw-list generation and the browser canvas painter
//! - `platform`: Browser glue (haptics, clock, listener cleanup)
//! - `session`: Session log record sent when a game finishes

pub mod config;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{ConfigError, EngineConfig, TimingMode};
pub use session::SessionRecord;
pub use sim::{CatchEngine, GameEvent, Playfield, PlayfieldRect, TickInput};

/// Game configuration constants
pub mod consts {
    /// Hearts needed to win
    pub const GOAL_SCORE: u32 = 25;
    /// Falling speed (pixels per tick)
    pub const GRAVITY: f32 = 2.5;
    /// Chance per tick of spawning an item
    pub const SPAWN_RATE: f32 = 0.03;
    /// Share of spawned items that are hearts
    pub const BENEFICIAL_BIAS: f32 = 0.7;

    pub const HOOK_WIDTH: f32 = 80.0;
    pub const HOOK_HEIGHT: f32 = 80.0;
    /// Gap between the hook's bottom edge and the playfield bottom
    pub const HOOK_MARGIN: f32 = 20.0;
    pub const ITEM_SIZE: f32 = 50.0;
    /// Shrinks the catch window so edge grazes don't count
    pub const CATCH_TOLERANCE: f32 = 10.0;

    /// How long the penalty toast stays up (ms, wall clock)
    pub const WARNING_MS: f64 = 1500.0;
    pub const WARNING_TEXT: &str = "Oops, that's a tool! 🔨 (-1 ❤️)";

    /// Nominal display refresh rate the per-tick constants were tuned for
    pub const REFERENCE_HZ: f32 = 60.0;
    /// Delta-time bounds for per-second timing
    pub const MIN_DT: f32 = 1.0 / 240.0;
    pub const MAX_DT: f32 = 0.1;
}

/// Clamp `x` into `[lo, hi]`, collapsing to the midpoint when the range is inverted
#[inline]
pub fn clamp_span(x: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        x.clamp(lo, hi)
    }
}
