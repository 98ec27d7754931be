//! Rendering module
//!
//! `sprites` turns game state into a flat draw list; painters consume it.
//! The Canvas 2D painter only exists in the browser build.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use sprites::{DrawCommand, Sprite, SpriteAtlas, frame};
