//! Frame scheduling: one authoritative run flag plus a stall watchdog.
//!
//! The frame loop is the only driver of simulation time. The watchdog does
//! not start a second loop when frames stop arriving (two drivers could step
//! the same logical tick twice); it only reports the stall so the loop can
//! rebaseline its clock. A stall is reported once per episode, no matter how
//! often it is checked, which makes recovery idempotent.

use std::time::Instant;

/// No frame for this long counts as a stalled loop.
pub const WATCHDOG_STALL_MS: u64 = 2000;

#[derive(Debug)]
pub struct FrameScheduler {
    running: bool,
    last_frame: Option<Instant>,
    stall_reported: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            running: false,
            last_frame: None,
            stall_reported: false,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.last_frame = Some(now);
        self.stall_reported = false;
    }

    /// Stop the loop. No further frames or stalls are observed until the
    /// next `start`.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_frame = None;
        self.stall_reported = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record that a frame ran. Clears any pending stall episode.
    pub fn observe_frame(&mut self, now: Instant) {
        if self.running {
            self.last_frame = Some(now);
            self.stall_reported = false;
        }
    }

    /// True exactly once per stall episode: when more than
    /// [`WATCHDOG_STALL_MS`] has passed since the last observed frame.
    pub fn check_stall(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let stalled = match self.last_frame {
            Some(t) => now.saturating_duration_since(t).as_millis() as u64 > WATCHDOG_STALL_MS,
            None => false,
        };
        if stalled && !self.stall_reported {
            self.stall_reported = true;
            return true;
        }
        false
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_starts_stopped() {
        let sched = FrameScheduler::new();
        assert!(!sched.is_running());
    }

    #[test]
    fn test_no_stall_while_frames_arrive() {
        let mut sched = FrameScheduler::new();
        let t0 = Instant::now();
        sched.start(t0);
        for i in 1..100 {
            let now = t0 + Duration::from_millis(i * 16);
            assert!(!sched.check_stall(now));
            sched.observe_frame(now);
        }
    }

    #[test]
    fn test_stall_detected_after_gap() {
        let mut sched = FrameScheduler::new();
        let t0 = Instant::now();
        sched.start(t0);
        let later = t0 + Duration::from_millis(WATCHDOG_STALL_MS + 1);
        assert!(sched.check_stall(later));
    }

    #[test]
    fn test_stall_reported_once_per_episode() {
        let mut sched = FrameScheduler::new();
        let t0 = Instant::now();
        sched.start(t0);
        let later = t0 + Duration::from_millis(WATCHDOG_STALL_MS + 1);
        assert!(sched.check_stall(later));
        // Re-checking without an intervening frame must not re-fire:
        // a second recovery would double-step the simulation.
        assert!(!sched.check_stall(later + Duration::from_millis(500)));
        assert!(!sched.check_stall(later + Duration::from_secs(10)));
    }

    #[test]
    fn test_frame_clears_stall_episode() {
        let mut sched = FrameScheduler::new();
        let t0 = Instant::now();
        sched.start(t0);
        let stall1 = t0 + Duration::from_millis(WATCHDOG_STALL_MS + 1);
        assert!(sched.check_stall(stall1));

        // A frame arrives; a later second stall is a new episode.
        sched.observe_frame(stall1);
        let stall2 = stall1 + Duration::from_millis(WATCHDOG_STALL_MS + 1);
        assert!(sched.check_stall(stall2));
    }

    #[test]
    fn test_stopped_scheduler_never_stalls() {
        let mut sched = FrameScheduler::new();
        let t0 = Instant::now();
        sched.start(t0);
        sched.stop();
        assert!(!sched.check_stall(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn test_observe_after_stop_is_ignored() {
        let mut sched = FrameScheduler::new();
        let t0 = Instant::now();
        sched.start(t0);
        sched.stop();
        sched.observe_frame(t0 + Duration::from_millis(16));
        assert!(!sched.is_running());
        assert!(!sched.check_stall(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn test_restart_begins_fresh_episode() {
        let mut sched = FrameScheduler::new();
        let t0 = Instant::now();
        sched.start(t0);
        let stall = t0 + Duration::from_millis(WATCHDOG_STALL_MS + 1);
        assert!(sched.check_stall(stall));
        sched.stop();
        sched.start(stall);
        assert!(!sched.check_stall(stall + Duration::from_millis(100)));
        assert!(sched.check_stall(stall + Duration::from_millis(WATCHDOG_STALL_MS + 1)));
    }
}
