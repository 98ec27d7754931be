//! Item spawner
//!
//! At most one item per tick. Draw order is fixed (spawn roll, x, category)
//! so scripted random sources reproduce exact games.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{FallingItem, GameEvent, GameState, ItemKind};
use crate::config::EngineConfig;

/// Roll for a spawn with the given per-tick chance; push the item if it hits.
///
/// Returns the new item's ID.
pub fn maybe_spawn<R: RandomSource + ?Sized>(
    state: &mut GameState,
    config: &EngineConfig,
    rng: &mut R,
    chance: f32,
) -> Option<u64> {
    if rng.next_unit() >= chance {
        return None;
    }

    let size = config.item_size;
    let max_x = (state.playfield.width - size).max(0.0);
    let x = rng.next_unit() * max_x;
    let kind = if rng.next_unit() > 1.0 - config.beneficial_bias {
        ItemKind::Beneficial
    } else {
        ItemKind::Penalty
    };

    let id = state.next_item_id();
    state.items.push(FallingItem {
        id,
        // Just above the visible top edge
        pos: Vec2::new(x, -size),
        size,
        kind,
        consumed: false,
    });
    state.events.push(GameEvent::Spawned { id, kind });
    log::debug!("spawned {:?} #{} at x={:.1}", kind, id, x);

    Some(id)
}

/// Per-tick spawn chance scaled to `ticks` reference ticks.
///
/// Keeps the expected spawns per second fixed while still allowing only one
/// spawn per frame.
pub fn scaled_chance(chance: f32, ticks: f32) -> f32 {
    if ticks == 1.0 {
        return chance;
    }
    (1.0 - (1.0 - chance).powf(ticks)).clamp(0.0, 1.0)
}
