//! Frame clock: bounded per-frame deltas.

use std::time::Instant;

/// Largest delta a single frame is allowed to report, in milliseconds.
///
/// A suspended terminal (ctrl-z, window hidden, debugger pause) can leave a
/// multi-second gap between frames; feeding that straight into the physics
/// produces one giant catch-up step. Clamping keeps resume smooth.
pub const MAX_FRAME_DELTA_MS: u64 = 33;

/// Tracks the previous frame timestamp and hands out clamped deltas.
#[derive(Debug)]
pub struct FrameClock {
    previous: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Milliseconds elapsed since the last `tick`, clamped to
    /// [`MAX_FRAME_DELTA_MS`]. The first call after construction or
    /// [`reset`](Self::reset) returns 0.
    pub fn tick(&mut self, now: Instant) -> u64 {
        let delta = match self.previous {
            Some(prev) => now.saturating_duration_since(prev).as_millis() as u64,
            None => 0,
        };
        self.previous = Some(now);
        delta.min(MAX_FRAME_DELTA_MS)
    }

    /// Rebaseline after a detected stall so the next tick reports 0 instead
    /// of a clamped catch-up delta.
    pub fn reset(&mut self, now: Instant) {
        self.previous = Some(now);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
