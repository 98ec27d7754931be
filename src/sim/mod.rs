//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - One tick per presented frame, all work synchronous
//! - Injected random source only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod engine;
pub mod input;
pub mod rng;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{catch_reach, is_caught};
pub use engine::CatchEngine;
pub use rng::{RandomSource, ScriptedRandom};
pub use score::ScoreChange;
pub use state::{
    EnginePhase, FallingItem, GameEvent, GameState, HapticCue, Hook, ItemKind, Playfield,
    PlayfieldRect, ScoreState, Warning,
};
pub use tick::{TickInput, tick};
