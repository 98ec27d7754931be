//! Demo-mode steering
//!
//! Chases the lowest heart that can still be caught. Ignores tools.

use super::state::{GameState, ItemKind};
use crate::config::EngineConfig;

/// Center x the hook should move to, if any heart is worth chasing
pub fn target_x(state: &GameState, config: &EngineConfig) -> Option<f32> {
    let floor = state.catch_floor(config);
    state
        .items
        .iter()
        .filter(|item| !item.consumed && item.kind == ItemKind::Beneficial)
        .filter(|item| item.center().y < floor)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|item| item.center().x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FallingItem, Playfield};
    use glam::Vec2;

    fn push(state: &mut GameState, x: f32, y: f32, kind: ItemKind) {
        let id = state.next_item_id();
        state.items.push(FallingItem {
            id,
            pos: Vec2::new(x, y),
            size: 50.0,
            kind,
            consumed: false,
        });
    }

    #[test]
    fn test_chases_lowest_catchable_heart() {
        let config = EngineConfig::default();
        let mut state = GameState::new(Playfield::new(400.0, 800.0), &config);
        assert_eq!(target_x(&state, &config), None);

        push(&mut state, 10.0, 100.0, ItemKind::Beneficial);
        push(&mut state, 300.0, 400.0, ItemKind::Beneficial);
        push(&mut state, 150.0, 600.0, ItemKind::Penalty);
        // Already below the catch band
        push(&mut state, 50.0, 780.0, ItemKind::Beneficial);

        assert_eq!(target_x(&state, &config), Some(325.0));
    }
}
