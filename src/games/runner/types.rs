//! Lane runner data structures and tuning.
//!
//! Top-down endless runner: the player holds one of three lanes while
//! hazards and coins scroll down from the top edge. Hazards end the run on
//! contact; jumping clears them, sliding shrinks the hitbox.

use crate::core::entity::{Entity, EntityKind};
use crate::core::score::ScoreBoard;
use crate::core::sound::CueQueue;
use crate::core::spawner::SpawnTimer;
use crate::core::store::{EntityId, EntityStore};
use rand::Rng;

/// World dimensions. Scenes scale this onto whatever cells they have.
pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

/// Lane center x positions (quarter points of the world width).
pub const LANE_CENTERS: [f64; 3] = [200.0, 400.0, 600.0];
pub const LANE_COUNT: usize = LANE_CENTERS.len();

/// Player top edge while grounded.
pub const GROUND_Y: f64 = 400.0;

pub const PLAYER_WIDTH: f64 = 40.0;
pub const PLAYER_HEIGHT: f64 = 60.0;
/// Hitbox height while sliding.
pub const SLIDE_HEIGHT: f64 = 30.0;
/// Slide duration in physics ticks.
pub const SLIDE_TICKS: u32 = 30;

/// Vertical velocity change per tick while airborne.
pub const GRAVITY: f64 = 0.5;
/// Velocity set by a jump (negative = up).
pub const JUMP_IMPULSE: f64 = -20.0;

/// Scroll speed in world units per tick: start, cap, per-tick ramp.
pub const BASE_SPEED: f64 = 5.0;
pub const MAX_SPEED: f64 = 15.0;
pub const SPEED_RAMP: f64 = 0.01;

pub const COIN_SIZE: f64 = 30.0;
pub const COIN_SCORE: u64 = 10;
pub const COIN_BURST_PARTICLES: usize = 6;
pub const PARTICLE_LIFE_TICKS: u32 = 60;

/// Spawn countdown ranges in ticks (hazards, coins), narrowed per level.
pub const HAZARD_SPAWN_TICKS: (u32, u32) = (60, 120);
pub const COIN_SPAWN_TICKS: (u32, u32) = (30, 60);

/// World-distance per level step.
pub const LEVEL_DISTANCE: f64 = 500.0;

/// Hazard footprints. All are low enough to jump over.
#[derive(Debug, Clone, Copy)]
pub struct HazardStyle {
    pub width: f64,
    pub height: f64,
}

pub const HAZARD_STYLES: [HazardStyle; 3] = [
    HazardStyle {
        width: 60.0,
        height: 40.0,
    },
    HazardStyle {
        width: 80.0,
        height: 30.0,
    },
    HazardStyle {
        width: 50.0,
        height: 45.0,
    },
];

/// Main game state.
#[derive(Debug)]
pub struct RunnerGame {
    /// True until the confirm/jump intent arrives. Physics paused meanwhile.
    pub waiting_to_start: bool,
    pub game_over: bool,

    /// Owns every live object, the player included.
    pub entities: EntityStore,
    pub player: EntityId,
    pub current_lane: usize,

    /// Current scroll speed in world units per tick.
    pub speed: f64,
    pub score: ScoreBoard,
    /// Fractional distance accumulator backing `score.distance`.
    pub distance_accum: f64,

    pub hazard_timer: SpawnTimer,
    pub coin_timer: SpawnTimer,

    /// Inputs buffered for the next physics tick.
    pub jump_queued: bool,
    pub slide_queued: bool,

    pub cues: CueQueue,
    pub accumulated_ms: u64,
    pub tick_count: u64,
}

impl RunnerGame {
    pub fn new() -> Self {
        let mut entities = EntityStore::new();
        let player = entities
            .spawn(Entity::new(
                LANE_CENTERS[1] - PLAYER_WIDTH / 2.0,
                GROUND_Y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
                EntityKind::Player {
                    jumping: false,
                    sliding: false,
                    slide_timer: 0,
                },
            ))
            .expect("fresh store has room for the player");

        Self {
            waiting_to_start: true,
            game_over: false,
            entities,
            player,
            current_lane: 1,
            speed: BASE_SPEED,
            score: ScoreBoard::new(),
            distance_accum: 0.0,
            hazard_timer: SpawnTimer::new(HAZARD_SPAWN_TICKS.0, HAZARD_SPAWN_TICKS.1)
                .narrowing(5, 30),
            coin_timer: SpawnTimer::new(COIN_SPAWN_TICKS.0, COIN_SPAWN_TICKS.1).narrowing(2, 15),
            jump_queued: false,
            slide_queued: false,
            cues: CueQueue::new(),
            accumulated_ms: 0,
            tick_count: 0,
        }
    }

    /// Difficulty counter: rises with distance, narrows the spawn ranges.
    pub fn level(&self) -> u32 {
        1 + (self.distance_accum / LEVEL_DISTANCE) as u32
    }

    /// Spawn one hazard at a random lane just above the top edge. Silently
    /// dropped when the hazard cap is reached.
    pub fn spawn_hazard<R: Rng>(&mut self, rng: &mut R) {
        let lane = rng.gen_range(0..LANE_COUNT);
        let style_idx = rng.gen_range(0..HAZARD_STYLES.len());
        let style = HAZARD_STYLES[style_idx];
        self.entities.spawn(Entity::new(
            LANE_CENTERS[lane] - style.width / 2.0,
            -style.height,
            style.width,
            style.height,
            EntityKind::Hazard {
                style: style_idx as u8,
            },
        ));
    }

    /// Spawn one coin at a random lane just above the top edge.
    pub fn spawn_coin<R: Rng>(&mut self, rng: &mut R) {
        let lane = rng.gen_range(0..LANE_COUNT);
        self.entities.spawn(Entity::new(
            LANE_CENTERS[lane] - COIN_SIZE / 2.0,
            -COIN_SIZE,
            COIN_SIZE,
            COIN_SIZE,
            EntityKind::Collectible { spin: 0.0 },
        ));
    }

    /// Burst of particles where a coin was collected.
    pub fn spawn_coin_burst<R: Rng>(&mut self, x: f64, y: f64, rng: &mut R) {
        for _ in 0..COIN_BURST_PARTICLES {
            let mut particle = Entity::new(
                x + COIN_SIZE / 2.0,
                y + COIN_SIZE / 2.0,
                4.0,
                4.0,
                EntityKind::Particle {
                    life: PARTICLE_LIFE_TICKS,
                    max_life: PARTICLE_LIFE_TICKS,
                },
            );
            particle.vx = rng.gen::<f64>() * 200.0 - 100.0;
            particle.vy = rng.gen::<f64>() * -200.0 - 100.0;
            self.entities.spawn(particle);
        }
    }
}

impl Default for RunnerGame {
    fn default() -> Self {
        Self::new()
    }
}
