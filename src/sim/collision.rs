//! Catch detection
//!
//! Center-distance test between an item and the hook, with the window
//! shrunk by a fixed tolerance on both axes.

use glam::Vec2;

use super::state::{FallingItem, Hook};

/// Half-extents of the catch window for a hook and item size
#[inline]
pub fn catch_reach(hook: &Hook, item_size: f32, tolerance: f32) -> Vec2 {
    hook.size / 2.0 + Vec2::splat(item_size / 2.0 - tolerance)
}

/// True when the item's center is strictly inside the hook's catch window.
///
/// Category plays no part; consumed items never match.
pub fn is_caught(item: &FallingItem, hook: &Hook, tolerance: f32) -> bool {
    if item.consumed {
        return false;
    }
    let dist = (item.center() - hook.center()).abs();
    dist.cmplt(catch_reach(hook, item.size, tolerance)).all()
}
