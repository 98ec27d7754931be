//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Haptic feedback
//! - Time
//! - Event listener and timer lifetime (removed on drop)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::HapticCue;

/// Vibration pattern in milliseconds (on, off, on, ...)
pub fn haptic_pattern(cue: HapticCue) -> &'static [u32] {
    match cue {
        HapticCue::Success => &[10, 30, 10],
        HapticCue::Failure => &[50, 50, 50, 50, 50],
    }
}

/// Play a haptic cue where the device supports it
#[cfg(target_arch = "wasm32")]
pub fn vibrate(cue: HapticCue) {
    web::vibrate(haptic_pattern(cue));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn vibrate(cue: HapticCue) {
    log::trace!("haptic {:?} ({:?})", cue, haptic_pattern(cue));
}
