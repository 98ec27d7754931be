//! Game state and core simulation types
//!
//! Everything the catch engine owns lives here. Nothing outside the engine
//! holds a reference into it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_span;
use crate::config::EngineConfig;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Constructed, no tick has run yet (assets may still be loading)
    Idle,
    /// Tick loop running
    Playing,
    /// Target reached. Terminal.
    Finished,
}

/// Falling item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Heart: +1
    Beneficial,
    /// Tool: -1, floored at zero
    Penalty,
}

/// A falling item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u64,
    /// Top-left corner, playfield-relative
    pub pos: Vec2,
    /// Side length of the square item
    pub size: f32,
    pub kind: ItemKind,
    pub consumed: bool,
}

impl FallingItem {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Where the playfield sits on screen (e.g. a canvas bounding rect)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayfieldRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// The player's hook
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hook {
    /// Horizontal center, clamped to the playfield
    pub x: f32,
    /// Top edge (fixed for a given playfield height)
    pub y: f32,
    pub size: Vec2,
}

impl Hook {
    /// Centered hook resting `margin` above the playfield bottom
    pub fn new(playfield: &Playfield, config: &EngineConfig) -> Self {
        let mut hook = Self {
            x: playfield.width / 2.0,
            y: 0.0,
            size: Vec2::new(config.hook_width, config.hook_height),
        };
        hook.fit(playfield, config.hook_margin);
        hook
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.size.y / 2.0)
    }

    /// Lowest and highest legal center x for a playfield width
    pub fn x_range(&self, width: f32) -> (f32, f32) {
        let half = self.size.x / 2.0;
        (half, width - half)
    }

    /// Move the center to `x`, clamped into the playfield
    pub fn set_x(&mut self, x: f32, width: f32) {
        let (lo, hi) = self.x_range(width);
        self.x = clamp_span(x, lo, hi);
    }

    /// Re-derive vertical position and re-clamp after a playfield change
    pub fn fit(&mut self, playfield: &Playfield, margin: f32) {
        self.y = playfield.height - self.size.y - margin;
        self.set_x(self.x, playfield.width);
    }
}

/// Score and win tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub target: u32,
    pub playing: bool,
}

impl ScoreState {
    pub fn new(target: u32) -> Self {
        Self {
            score: 0,
            target,
            playing: true,
        }
    }
}

/// Haptic feedback requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticCue {
    Success,
    Failure,
}

/// Penalty toast with a wall-clock expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub text: String,
    pub expires_at_ms: f64,
}

impl Warning {
    pub fn is_active(&self, now_ms: f64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Things the host may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u64, kind: ItemKind },
    Caught { id: u64, kind: ItemKind, score: u32 },
    Haptic(HapticCue),
    /// Left the bottom of the playfield uncaught
    Fell { id: u64 },
    /// Target reached. Emitted once per engine.
    Finished { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: EnginePhase,
    pub playfield: Playfield,
    pub hook: Hook,
    pub score: ScoreState,
    /// Live items (order irrelevant)
    pub items: Vec<FallingItem>,
    pub warning: Option<Warning>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next item ID
    next_id: u64,
}

impl GameState {
    pub fn new(playfield: Playfield, config: &EngineConfig) -> Self {
        Self {
            phase: EnginePhase::Idle,
            playfield,
            hook: Hook::new(&playfield, config),
            score: ScoreState::new(config.target_score),
            items: Vec::new(),
            warning: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new item ID
    pub fn next_item_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Bottom edge of the catch band: items whose center is below this are gone for good
    pub fn catch_floor(&self, config: &EngineConfig) -> f32 {
        self.hook.center().y + self.hook.size.y / 2.0 + config.item_size / 2.0
            - config.catch_tolerance
    }
}
