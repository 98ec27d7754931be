//! Pointer/touch tracking
//!
//! Raw screen x comes in, a clamped hook center goes out. Last write wins.

use super::state::{Hook, Playfield, PlayfieldRect};

/// Apply a raw horizontal screen coordinate to the hook.
///
/// No-op when the playfield rect is not known yet or the coordinate is not
/// finite. Out-of-bounds input is clamped, never rejected.
pub fn track_pointer(
    hook: &mut Hook,
    playfield: &Playfield,
    raw_x: f32,
    bounds: Option<&PlayfieldRect>,
) {
    let Some(rect) = bounds else {
        log::trace!("pointer move before playfield is known");
        return;
    };
    if !raw_x.is_finite() || !rect.left.is_finite() {
        log::trace!("ignoring non-finite pointer x {}", raw_x);
        return;
    }

    hook.set_x(raw_x - rect.left, playfield.width);
}
