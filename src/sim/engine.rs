//! Catch engine handle
//!
//! Owns the game state, config and random source. Hosts hold one engine per
//! game screen and pass it to their input and frame callbacks; the engine
//! never calls back into the host. Completion is read from `drain_events` or
//! `final_score`.

use rand_pcg::Pcg32;

use super::autopilot;
use super::input::track_pointer;
use super::rng::{self, RandomSource};
use super::state::{
    EnginePhase, FallingItem, GameEvent, GameState, Hook, Playfield, PlayfieldRect,
};
use super::tick::{TickInput, tick};
use crate::config::{ConfigError, EngineConfig};

pub struct CatchEngine<R: RandomSource = Pcg32> {
    state: GameState,
    config: EngineConfig,
    rng: R,
}

impl CatchEngine<Pcg32> {
    /// Engine with a seeded PCG
    pub fn seeded(config: EngineConfig, playfield: Playfield, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, playfield, rng::seeded(seed))
    }
}

impl<R: RandomSource> CatchEngine<R> {
    pub fn new(config: EngineConfig, playfield: Playfield, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(playfield, &config);
        Ok(Self { state, config, rng })
    }

    /// Pointer or touch moved to screen x. Ignored once finished.
    pub fn pointer_moved(&mut self, raw_x: f32, bounds: Option<PlayfieldRect>) {
        if self.is_finished() {
            return;
        }
        track_pointer(
            &mut self.state.hook,
            &self.state.playfield,
            raw_x,
            bounds.as_ref(),
        );
    }

    /// Move the hook to a playfield-relative x
    pub fn steer_to(&mut self, x: f32) {
        if self.is_finished() || !x.is_finite() {
            return;
        }
        self.state.hook.set_x(x, self.state.playfield.width);
    }

    /// Steer toward the autopilot's pick. Returns whether it moved.
    pub fn autopilot(&mut self) -> bool {
        match autopilot::target_x(&self.state, &self.config) {
            Some(x) => {
                self.steer_to(x);
                true
            }
            None => false,
        }
    }

    /// Playfield resized (e.g. window resize)
    pub fn resize(&mut self, playfield: Playfield) {
        if self.is_finished() {
            return;
        }
        self.state.playfield = playfield;
        self.state.hook.fit(&playfield, self.config.hook_margin);
        log::debug!("playfield resized to {}x{}", playfield.width, playfield.height);
    }

    /// Run one frame
    pub fn tick(&mut self, input: &TickInput) {
        tick(&mut self.state, &self.config, &mut self.rng, input);
    }

    pub fn score(&self) -> u32 {
        self.state.score.score
    }

    pub fn target(&self) -> u32 {
        self.state.score.target
    }

    pub fn hud_text(&self) -> String {
        self.state.score.hud_text()
    }

    /// Penalty toast text, while it has not expired
    pub fn warning(&self, now_ms: f64) -> Option<&str> {
        self.state
            .warning
            .as_ref()
            .filter(|w| w.is_active(now_ms))
            .map(|w| w.text.as_str())
    }

    /// When the current penalty toast expires, if one was ever raised.
    /// Hosts use it to clear the toast on a timer of their own.
    pub fn warning_expires_at(&self) -> Option<f64> {
        self.state.warning.as_ref().map(|w| w.expires_at_ms)
    }

    pub fn phase(&self) -> EnginePhase {
        self.state.phase
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase == EnginePhase::Finished
    }

    /// Final score once the target has been reached
    pub fn final_score(&self) -> Option<u32> {
        self.is_finished().then_some(self.state.score.score)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn items(&self) -> &[FallingItem] {
        &self.state.items
    }

    pub fn hook(&self) -> &Hook {
        &self.state.hook
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingMode;
    use crate::sim::rng::ScriptedRandom;
    use crate::sim::state::ItemKind;
    use proptest::prelude::*;

    const FIELD: Playfield = Playfield {
        width: 400.0,
        height: 800.0,
    };

    fn scripted(values: impl IntoIterator<Item = f32>) -> CatchEngine<ScriptedRandom> {
        CatchEngine::new(EngineConfig::default(), FIELD, ScriptedRandom::new(values)).unwrap()
    }

    /// Spawn draws that drop one item of `kind` directly above the centered hook
    fn drop_over_hook(kind: ItemKind) -> [f32; 3] {
        // x = 0.5 * (400 - 50) = 175 -> center 200
        let category = match kind {
            ItemKind::Beneficial => 0.9,
            ItemKind::Penalty => 0.1,
        };
        [0.0, 0.5, category]
    }

    fn run(engine: &mut CatchEngine<ScriptedRandom>, frames: usize, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            engine.tick(&TickInput::frame(now_ms, 1.0 / 60.0));
            events.extend(engine.drain_events());
        }
        events
    }

    fn caught_count(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Caught { .. }))
            .count()
    }

    /// Ticks for a spawned item to reach the catch band (center past 685)
    const FALL_TICKS: usize = 285;

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            spawn_chance: -0.1,
            ..Default::default()
        };
        assert!(CatchEngine::seeded(config, FIELD, 1).is_err());
    }

    #[test]
    fn test_centered_heart_is_caught_and_pruned() {
        let mut engine = scripted(drop_over_hook(ItemKind::Beneficial));
        assert_eq!(engine.hook().x, 200.0);

        let events = run(&mut engine, FALL_TICKS - 1, 0.0);
        assert_eq!(caught_count(&events), 0);
        assert_eq!(engine.items().len(), 1);

        let events = run(&mut engine, 1, 0.0);
        assert_eq!(caught_count(&events), 1);
        assert_eq!(engine.score(), 1);
        assert!(engine.items().is_empty());
        assert_eq!(engine.hud_text(), "1 / 25");
    }

    #[test]
    fn test_24_to_25_finishes_once() {
        let mut engine = scripted(drop_over_hook(ItemKind::Beneficial));
        engine.state.score.score = 24;

        let events = run(&mut engine, FALL_TICKS + 50, 0.0);
        let finished: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Finished { .. }))
            .collect();
        assert_eq!(finished, vec![&GameEvent::Finished { score: 25 }]);
        assert!(engine.is_finished());
        assert!(!engine.state().score.playing);
        assert_eq!(engine.final_score(), Some(25));
        assert_eq!(engine.state().time_ticks, FALL_TICKS as u64);

        // Input after the finish is ignored
        let x = engine.hook().x;
        engine.pointer_moved(0.0, Some(PlayfieldRect { left: 0.0, top: 0.0, width: 400.0, height: 800.0 }));
        assert_eq!(engine.hook().x, x);
    }

    #[test]
    fn test_penalty_at_zero_shows_warning_then_clears() {
        let mut engine = scripted(drop_over_hook(ItemKind::Penalty));
        run(&mut engine, FALL_TICKS, 10_000.0);

        assert_eq!(engine.score(), 0);
        assert_eq!(engine.warning(10_000.0), Some("Oops, that's a tool! 🔨 (-1 ❤️)"));
        assert!(engine.warning(11_499.0).is_some());
        // Cleared by wall clock alone, no further ticks needed
        assert_eq!(engine.warning(11_500.0), None);
    }

    #[test]
    fn test_later_penalty_extends_warning() {
        let mut engine = scripted(drop_over_hook(ItemKind::Penalty));
        run(&mut engine, FALL_TICKS, 0.0);
        engine.rng.push(drop_over_hook(ItemKind::Penalty));
        run(&mut engine, FALL_TICKS, 1000.0);
        assert!(engine.warning(2000.0).is_some());
        assert_eq!(engine.warning(2500.0), None);
    }

    #[test]
    fn test_warning_clears_on_schedule_after_finish() {
        let mut engine = scripted(drop_over_hook(ItemKind::Penalty));
        engine.state.score.score = 24;
        run(&mut engine, FALL_TICKS, 0.0);
        assert_eq!(engine.score(), 23);

        // Win 200 ms after the penalty, then stop ticking
        engine.state.score.score = 24;
        engine.rng.push(drop_over_hook(ItemKind::Beneficial));
        run(&mut engine, FALL_TICKS, 200.0);
        assert!(engine.is_finished());

        assert_eq!(engine.warning_expires_at(), Some(1500.0));
        assert!(engine.warning(200.0).is_some());
        assert_eq!(engine.warning(1500.0), None);
    }

    #[test]
    fn test_far_item_falls_through_without_score_change() {
        // x = 0 -> center 25, far from the hook at 200
        let mut engine = scripted([0.0, 0.0, 0.9]);
        let events = run(&mut engine, 400, 0.0);
        assert_eq!(caught_count(&events), 0);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Fell { .. })));
        assert!(engine.items().is_empty());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_penalty_run_from_three() {
        let mut engine = scripted([]);
        engine.state.score.score = 3;
        let mut scores = vec![engine.score()];
        for _ in 0..4 {
            engine.rng.push(drop_over_hook(ItemKind::Penalty));
            run(&mut engine, FALL_TICKS, 0.0);
            scores.push(engine.score());
        }
        assert_eq!(scores, vec![3, 2, 1, 0, 0]);
    }

    #[test]
    fn test_pointer_before_rect_is_noop() {
        let mut engine = scripted([]);
        engine.pointer_moved(10.0, None);
        assert_eq!(engine.hook().x, 200.0);
        engine.pointer_moved(10.0, Some(PlayfieldRect { left: 0.0, top: 0.0, width: 400.0, height: 800.0 }));
        assert_eq!(engine.hook().x, 40.0);
    }

    #[test]
    fn test_resize_keeps_hook_in_bounds() {
        let mut engine = scripted([]);
        engine.steer_to(360.0);
        engine.resize(Playfield::new(200.0, 500.0));
        assert_eq!(engine.hook().x, 160.0);
        assert_eq!(engine.hook().y, 400.0);
    }

    #[test]
    fn test_per_frame_speed_depends_on_refresh_rate() {
        // Default timing is per frame: a 144 Hz display falls faster in wall time
        let mut slow = scripted([0.0, 0.0, 0.9]);
        let mut fast = scripted([0.0, 0.0, 0.9]);
        run(&mut slow, 60, 0.0);
        for _ in 0..144 {
            fast.tick(&TickInput::frame(0.0, 1.0 / 144.0));
        }
        assert!(fast.items()[0].pos.y > slow.items()[0].pos.y * 2.0);
    }

    #[test]
    fn test_per_second_speed_is_refresh_independent() {
        let config = EngineConfig {
            timing: TimingMode::per_second(),
            ..Default::default()
        };
        let mut slow = CatchEngine::new(config.clone(), FIELD, ScriptedRandom::new([0.0, 0.0, 0.9])).unwrap();
        let mut fast = CatchEngine::new(config, FIELD, ScriptedRandom::new([0.0, 0.0, 0.9])).unwrap();
        for _ in 0..60 {
            slow.tick(&TickInput::frame(0.0, 1.0 / 60.0));
        }
        for _ in 0..144 {
            fast.tick(&TickInput::frame(0.0, 1.0 / 144.0));
        }
        let (a, b) = (slow.items()[0].pos.y, fast.items()[0].pos.y);
        // One second of falling either way, give or take the spawn frame
        assert!((a - b).abs() < 3.0, "{} vs {}", a, b);
    }

    #[test]
    fn test_autopilot_plays_a_seeded_game_to_the_end() {
        let mut engine = CatchEngine::seeded(EngineConfig::default(), FIELD, 2024).unwrap();
        let mut finishes = 0;
        for frame in 0..200_000 {
            engine.autopilot();
            engine.tick(&TickInput::frame(frame as f64 * 16.0, 1.0 / 60.0));
            finishes += engine
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Finished { .. }))
                .count();
            if engine.is_finished() {
                break;
            }
        }
        assert!(engine.is_finished());
        assert_eq!(finishes, 1);
        assert_eq!(engine.final_score(), Some(25));
    }

    proptest! {
        #[test]
        fn prop_items_fall_monotonically(seed in any::<u64>(), moves in prop::collection::vec(-200.0f32..800.0, 1..300)) {
            let mut engine = CatchEngine::seeded(
                EngineConfig { spawn_chance: 0.2, ..Default::default() },
                FIELD,
                seed,
            ).unwrap();
            let rect = PlayfieldRect { left: 0.0, top: 0.0, width: 400.0, height: 800.0 };
            let mut last: std::collections::HashMap<u64, f32> = Default::default();
            for x in moves {
                engine.pointer_moved(x, Some(rect));
                let (lo, hi) = engine.hook().x_range(400.0);
                prop_assert!(engine.hook().x >= lo && engine.hook().x <= hi);

                engine.tick(&TickInput::frame(0.0, 1.0 / 60.0));
                for item in engine.items() {
                    if let Some(prev) = last.get(&item.id) {
                        prop_assert!(item.pos.y > *prev);
                    }
                    prop_assert!(!item.consumed);
                }
                last = engine.items().iter().map(|i| (i.id, i.pos.y)).collect();
            }
        }

        #[test]
        fn prop_no_mutation_after_finish(extra in 1usize..200, seed in any::<u64>()) {
            let mut engine = CatchEngine::seeded(
                EngineConfig { target_score: 1, spawn_chance: 0.5, ..Default::default() },
                FIELD,
                seed,
            ).unwrap();
            let mut finishes = 0;
            for _ in 0..100_000 {
                engine.autopilot();
                engine.tick(&TickInput::default());
                finishes += engine.drain_events().iter().filter(|e| matches!(e, GameEvent::Finished { .. })).count();
                if engine.is_finished() {
                    break;
                }
            }
            prop_assert!(engine.is_finished());
            let score = engine.score();
            for _ in 0..extra {
                engine.autopilot();
                engine.tick(&TickInput::default());
                prop_assert!(engine.drain_events().is_empty());
            }
            prop_assert_eq!(engine.score(), score);
            prop_assert_eq!(finishes, 1);
        }
    }
}
