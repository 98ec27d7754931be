//! Draw-list generation for the single sprite layer

use glam::Vec2;

use crate::sim::state::{GameState, ItemKind};

/// Sprite images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Heart,
    Tool,
    Hook,
}

impl Sprite {
    pub const ALL: [Sprite; 3] = [Sprite::Heart, Sprite::Tool, Sprite::Hook];

    /// Image path relative to the page
    pub fn url(&self) -> &'static str {
        match self {
            Sprite::Heart => "assets/heart.png",
            Sprite::Tool => "assets/hammer.png",
            Sprite::Hook => "assets/hook.png",
        }
    }

    pub fn for_item(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Beneficial => Sprite::Heart,
            ItemKind::Penalty => Sprite::Tool,
        }
    }
}

/// One sprite blit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: Sprite,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Clip to the inscribed circle
    pub circular: bool,
}

/// Tells a painter whether a sprite's image has finished loading
pub trait SpriteAtlas {
    fn is_ready(&self, sprite: Sprite) -> bool;
}

/// Items first, hook on top. Consumed items are never drawn.
pub fn frame(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(state.items.len() + 1);

    for item in state.items.iter().filter(|i| !i.consumed) {
        commands.push(DrawCommand {
            sprite: Sprite::for_item(item.kind),
            pos: item.pos,
            size: Vec2::splat(item.size),
            circular: true,
        });
    }

    let hook = &state.hook;
    commands.push(DrawCommand {
        sprite: Sprite::Hook,
        pos: Vec2::new(hook.x - hook.size.x / 2.0, hook.y),
        size: hook.size,
        circular: false,
    });

    commands
}

/// Drop commands whose image is not loaded yet
pub fn ready<'a, A: SpriteAtlas + ?Sized>(
    commands: &'a [DrawCommand],
    atlas: &'a A,
) -> impl Iterator<Item = &'a DrawCommand> + 'a {
    commands.iter().filter(move |c| atlas.is_ready(c.sprite))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::sim::state::{FallingItem, Playfield};

    struct Loaded(Vec<Sprite>);

    impl SpriteAtlas for Loaded {
        fn is_ready(&self, sprite: Sprite) -> bool {
            self.0.contains(&sprite)
        }
    }

    fn state_with_items() -> GameState {
        let mut state = GameState::new(Playfield::new(400.0, 800.0), &EngineConfig::default());
        for (i, kind) in [ItemKind::Beneficial, ItemKind::Penalty, ItemKind::Beneficial]
            .into_iter()
            .enumerate()
        {
            let id = state.next_item_id();
            state.items.push(FallingItem {
                id,
                pos: Vec2::new(60.0 * i as f32, 100.0),
                size: 50.0,
                kind,
                consumed: i == 2,
            });
        }
        state
    }

    #[test]
    fn test_frame_skips_consumed_and_draws_hook_last() {
        let commands = frame(&state_with_items());
        let sprites: Vec<_> = commands.iter().map(|c| c.sprite).collect();
        assert_eq!(sprites, vec![Sprite::Heart, Sprite::Tool, Sprite::Hook]);

        let hook = commands.last().unwrap();
        assert_eq!(hook.pos, Vec2::new(160.0, 700.0));
        assert!(!hook.circular);
        assert!(commands[0].circular);
    }

    #[test]
    fn test_unloaded_sprites_are_skipped() {
        let commands = frame(&state_with_items());

        let nothing = Loaded(vec![]);
        assert_eq!(ready(&commands, &nothing).count(), 0);

        let partial = Loaded(vec![Sprite::Hook, Sprite::Tool]);
        let drawn: Vec<_> = ready(&commands, &partial).map(|c| c.sprite).collect();
        assert_eq!(drawn, vec![Sprite::Tool, Sprite::Hook]);
    }
}
