//! Star runner data structures and tuning.
//!
//! Side-view platform field: the player hops drifting platforms, grabs
//! crystals (+10) and shrugs off rocks (−5, floored at zero — the run
//! continues). Score also trickles in at one point per second. Levels every
//! 100 points speed the drift and tighten both spawn intervals. Falling off
//! the bottom ends the run.

use crate::core::score::ScoreBoard;
use crate::core::sound::CueQueue;
use crate::core::spawner::IntervalTimer;
use rand::Rng;

pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;
/// Falling past this line ends the run (beyond the visible bottom, so a
/// deep drop can still be recovered over a lower platform).
pub const KILL_LINE: f64 = 800.0;

pub const PLAYER_SIZE: f64 = 30.0;
pub const PLAYER_START_X: f64 = 200.0;
pub const PLAYER_START_Y: f64 = 450.0;

/// Units per second squared; applied only once the run has started.
pub const GRAVITY: f64 = 400.0;
/// Jump velocity, only from a platform.
pub const JUMP_VELOCITY: f64 = -250.0;
/// Horizontal nudge per move intent, in world units.
pub const MOVE_NUDGE: f64 = 14.0;

pub const PLATFORM_WIDTH: f64 = 120.0;
pub const PLATFORM_HEIGHT: f64 = 20.0;
pub const PLATFORM_COUNT: usize = 5;
/// Initial platform row.
pub const PLATFORM_Y: f64 = 500.0;
/// Base drift in units per second; +30 per level.
pub const BASE_DRIFT: f64 = 120.0;
pub const DRIFT_PER_LEVEL: f64 = 30.0;

pub const CRYSTAL_SIZE: f64 = 20.0;
pub const CRYSTAL_SCORE: u64 = 10;
pub const ROCK_SIZE: f64 = 30.0;
pub const ROCK_PENALTY: u64 = 5;

/// Spawn intervals in milliseconds: initial, per-level narrowing, floor.
pub const CRYSTAL_INTERVAL_MS: u64 = 2000;
pub const CRYSTAL_NARROW_MS: u64 = 100;
pub const CRYSTAL_FLOOR_MS: u64 = 500;
pub const ROCK_INTERVAL_MS: u64 = 3000;
pub const ROCK_NARROW_MS: u64 = 50;
pub const ROCK_FLOOR_MS: u64 = 1000;

/// Points per level step.
pub const LEVEL_SCORE: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Crystal {
    pub x: f64,
    pub y: f64,
    /// Bob phase for rendering.
    pub bob: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rock {
    pub x: f64,
    pub y: f64,
    /// Rotation phase for rendering.
    pub spin: f64,
}

/// Main game state.
#[derive(Debug)]
pub struct SpaceGame {
    pub waiting_to_start: bool,
    pub game_over: bool,
    /// Gravity stays off until the run formally starts.
    pub gravity_enabled: bool,

    pub player_x: f64,
    pub player_y: f64,
    pub player_vy: f64,
    pub on_platform: bool,

    pub platforms: Vec<Platform>,
    pub crystals: Vec<Crystal>,
    pub rocks: Vec<Rock>,

    pub crystal_timer: IntervalTimer,
    pub rock_timer: IntervalTimer,

    pub score: ScoreBoard,
    pub level: u32,
    /// Millisecond accumulator for the per-second trickle point.
    pub second_ms: u64,

    pub jump_queued: bool,
    /// Pending horizontal nudges: negative left, positive right.
    pub nudge: i32,

    pub cues: CueQueue,
    pub accumulated_ms: u64,
    pub tick_count: u64,
}

impl SpaceGame {
    pub fn new() -> Self {
        let platforms = (0..PLATFORM_COUNT)
            .map(|i| Platform {
                x: 200.0 + i as f64 * 150.0,
                y: PLATFORM_Y,
            })
            .collect();

        Self {
            waiting_to_start: true,
            game_over: false,
            gravity_enabled: false,
            player_x: PLAYER_START_X,
            player_y: PLAYER_START_Y,
            player_vy: 0.0,
            on_platform: false,
            platforms,
            crystals: Vec::new(),
            rocks: Vec::new(),
            crystal_timer: IntervalTimer::new(CRYSTAL_INTERVAL_MS)
                .narrowing(CRYSTAL_NARROW_MS, CRYSTAL_FLOOR_MS),
            rock_timer: IntervalTimer::new(ROCK_INTERVAL_MS).narrowing(ROCK_NARROW_MS, ROCK_FLOOR_MS),
            score: ScoreBoard::new(),
            level: 1,
            second_ms: 0,
            jump_queued: false,
            nudge: 0,
            cues: CueQueue::new(),
            accumulated_ms: 0,
            tick_count: 0,
        }
    }

    /// Platform drift speed at the current level, units per second.
    pub fn drift_speed(&self) -> f64 {
        BASE_DRIFT + DRIFT_PER_LEVEL * f64::from(self.level.saturating_sub(1))
    }

    pub fn spawn_crystal<R: Rng>(&mut self, rng: &mut R) {
        self.crystals.push(Crystal {
            x: rng.gen_range(100.0..700.0),
            y: rng.gen_range(100.0..400.0),
            bob: rng.gen::<f64>(),
        });
    }

    pub fn spawn_rock<R: Rng>(&mut self, rng: &mut R) {
        self.rocks.push(Rock {
            x: rng.gen_range(200.0..600.0),
            y: rng.gen_range(300.0..500.0),
            spin: 0.0,
        });
    }
}

impl Default for SpaceGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_game_defaults() {
        let game = SpaceGame::new();
        assert!(game.waiting_to_start);
        assert!(!game.gravity_enabled, "gravity off before the run starts");
        assert_eq!(game.platforms.len(), PLATFORM_COUNT);
        assert!(game.crystals.is_empty());
        assert!(game.rocks.is_empty());
        assert_eq!(game.level, 1);
        assert_eq!(game.score.score, 0);
    }

    #[test]
    fn test_initial_platforms_are_spaced() {
        let game = SpaceGame::new();
        for pair in game.platforms.windows(2) {
            assert!((pair[1].x - pair[0].x - 150.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_drift_speed_rises_with_level() {
        let mut game = SpaceGame::new();
        let base = game.drift_speed();
        game.level = 3;
        assert!((game.drift_speed() - (base + 2.0 * DRIFT_PER_LEVEL)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spawns_land_in_bounds() {
        let mut game = SpaceGame::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            game.spawn_crystal(&mut rng);
            game.spawn_rock(&mut rng);
        }
        assert!(game
            .crystals
            .iter()
            .all(|c| (100.0..700.0).contains(&c.x) && (100.0..400.0).contains(&c.y)));
        assert!(game
            .rocks
            .iter()
            .all(|r| (200.0..600.0).contains(&r.x) && (300.0..500.0).contains(&r.y)));
    }
}
