//! Spawn timers: countdowns that re-arm to a random (and narrowing) range.

use rand::Rng;

/// Frame-countdown spawn timer.
///
/// Decrements once per logical tick. On reaching zero it reports a spawn and
/// re-arms to a random tick count drawn from its range. The range narrows as
/// the level rises, down to a floor, so spawns grow more frequent without
/// the range ever inverting.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    ticks_left: u32,
    base_min: u32,
    base_max: u32,
    narrow_per_level: u32,
    floor_min: u32,
}

impl SpawnTimer {
    /// Timer that fires on its first step, then re-arms into `min..=max`.
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            ticks_left: 0,
            base_min: min,
            base_max: max,
            narrow_per_level: 0,
            floor_min: min,
        }
    }

    /// Shrink both ends of the range by `per_level` ticks for every level
    /// past the first, never dropping below `floor`.
    pub fn narrowing(mut self, per_level: u32, floor: u32) -> Self {
        self.narrow_per_level = per_level;
        self.floor_min = floor;
        self
    }

    /// Advance one tick. Returns true when a spawn is due this tick.
    pub fn step<R: Rng>(&mut self, level: u32, rng: &mut R) -> bool {
        if self.ticks_left == 0 {
            let (min, max) = self.range_at(level);
            self.ticks_left = rng.gen_range(min..=max);
            return true;
        }
        self.ticks_left -= 1;
        false
    }

    /// The re-arm range at a given level.
    pub fn range_at(&self, level: u32) -> (u32, u32) {
        let shrink = self.narrow_per_level.saturating_mul(level.saturating_sub(1));
        let min = self.base_min.saturating_sub(shrink).max(self.floor_min);
        let max = self.base_max.saturating_sub(shrink).max(min);
        (min, max)
    }

    /// Push the next spawn far into the future (tests and cutscenes).
    pub fn suppress(&mut self) {
        self.ticks_left = u32::MAX;
    }
}

/// Millisecond interval timer for games that spawn on wall-clock periods
/// rather than frame counts. Fires at most once per `step`, then re-arms to
/// the current level's interval.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    remaining_ms: u64,
    base_interval_ms: u64,
    narrow_per_level_ms: u64,
    floor_ms: u64,
}

impl IntervalTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            remaining_ms: interval_ms,
            base_interval_ms: interval_ms,
            narrow_per_level_ms: 0,
            floor_ms: interval_ms,
        }
    }

    pub fn narrowing(mut self, per_level_ms: u64, floor_ms: u64) -> Self {
        self.narrow_per_level_ms = per_level_ms;
        self.floor_ms = floor_ms;
        self
    }

    /// Advance by `dt_ms`. Returns true when the interval has elapsed.
    pub fn step(&mut self, dt_ms: u64, level: u32) -> bool {
        if self.remaining_ms <= dt_ms {
            self.remaining_ms = self.interval_at(level);
            true
        } else {
            self.remaining_ms -= dt_ms;
            false
        }
    }

    pub fn interval_at(&self, level: u32) -> u64 {
        let shrink = self
            .narrow_per_level_ms
            .saturating_mul(u64::from(level.saturating_sub(1)));
        self.base_interval_ms.saturating_sub(shrink).max(self.floor_ms)
    }
}
