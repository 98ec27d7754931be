//! Per-frame simulation tick
//!
//! Order within a tick: spawn, then move-and-check each item in turn, then
//! prune. Nothing here suspends or touches the platform.

use super::collision::is_caught;
use super::rng::RandomSource;
use super::spawn::{maybe_spawn, scaled_chance};
use super::state::{EnginePhase, GameEvent, GameState, HapticCue, ItemKind, Warning};
use crate::config::EngineConfig;

/// Frame timing handed in by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Wall clock at this frame (ms), used for toast expiry
    pub now_ms: f64,
    /// Seconds since the previous frame (ignored in per-frame timing)
    pub dt: f32,
}

impl TickInput {
    pub fn frame(now_ms: f64, dt: f32) -> Self {
        Self { now_ms, dt }
    }
}

/// Advance the game by one presented frame
///
/// The winning catch ends the item pass: items after it in that tick are left
/// where they were, since a finished engine no longer changes state.
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut GameState,
    config: &EngineConfig,
    rng: &mut R,
    input: &TickInput,
) {
    match state.phase {
        EnginePhase::Finished => return,
        EnginePhase::Idle => {
            log::info!("Catch engine playing (target {})", state.score.target);
            state.phase = EnginePhase::Playing;
        }
        EnginePhase::Playing => {}
    }

    state.time_ticks += 1;

    let ticks = config.timing.tick_scale(input.dt);
    let fall = config.gravity * ticks;

    maybe_spawn(state, config, rng, scaled_chance(config.spawn_chance, ticks));

    // Move and check each item before touching the next one, so an item can
    // be caught on the same tick it enters the hook band.
    let hook = state.hook;
    for item in state.items.iter_mut() {
        if item.consumed {
            continue;
        }

        item.pos.y += fall;

        if !is_caught(item, &hook, config.catch_tolerance) {
            continue;
        }
        item.consumed = true;

        let Some(change) = state.score.apply_catch(item.kind) else {
            break;
        };
        state.events.push(GameEvent::Caught {
            id: item.id,
            kind: item.kind,
            score: change.score,
        });
        log::debug!("caught {:?} #{} -> {}", item.kind, item.id, change.score);

        match item.kind {
            ItemKind::Beneficial => {
                state.events.push(GameEvent::Haptic(HapticCue::Success));
            }
            ItemKind::Penalty => {
                state.events.push(GameEvent::Haptic(HapticCue::Failure));
                state.warning = Some(Warning {
                    text: config.warning_text.clone(),
                    expires_at_ms: input.now_ms + config.warning_ms,
                });
            }
        }

        if change.finished {
            state.phase = EnginePhase::Finished;
            state.events.push(GameEvent::Finished {
                score: change.score,
            });
            log::info!(
                "Target reached with score {} after {} ticks",
                change.score,
                state.time_ticks
            );
            break;
        }
    }

    prune(state);
}

/// Drop consumed items and items that fell off the bottom
fn prune(state: &mut GameState) {
    let floor = state.playfield.height;
    let events = &mut state.events;
    state.items.retain(|item| {
        if item.consumed {
            return false;
        }
        if item.pos.y >= floor {
            // No penalty for a missed heart
            events.push(GameEvent::Fell { id: item.id });
            return false;
        }
        true
    });
}
