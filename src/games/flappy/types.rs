//! Flappy glider data structures and tuning.
//!
//! The bird holds a fixed column while pipe columns scroll in from the
//! right. Each column is eight stacked segments with a two-segment hole at
//! a random row. Scoring follows the column spawn, not the pass.

use crate::core::entity::{Entity, EntityKind};
use crate::core::score::ScoreBoard;
use crate::core::sound::CueQueue;
use crate::core::spawner::IntervalTimer;
use rand::Rng;

pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 490.0;

/// Bird's fixed left edge and square hitbox size.
pub const BIRD_X: f64 = 100.0;
pub const BIRD_SIZE: f64 = 30.0;
pub const BIRD_START_Y: f64 = 245.0;

/// Units per second squared (down) and the flap velocity override (up).
pub const GRAVITY: f64 = 1000.0;
pub const FLAP_VELOCITY: f64 = -350.0;

/// Leftward pipe speed in units per second.
pub const PIPE_SPEED: f64 = 200.0;
pub const PIPE_WIDTH: f64 = 50.0;
pub const SEGMENT_HEIGHT: f64 = 60.0;
/// Segments stacked per column; the top segment sits at y = 10.
pub const SEGMENT_ROWS: u16 = 8;
pub const COLUMN_TOP_Y: f64 = 10.0;
/// Rows skipped per column (the hole).
pub const HOLE_SPAN: u16 = 2;

pub const SPAWN_INTERVAL_MS: u64 = 1500;

/// One pipe segment: a fixed row in a scrolling column.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSegment {
    pub x: f64,
    pub row: u16,
}

impl PipeSegment {
    /// Segment top edge in world units.
    pub fn y(&self) -> f64 {
        f64::from(self.row) * SEGMENT_HEIGHT + COLUMN_TOP_Y
    }

    /// The segment as a collision entity.
    pub fn as_entity(&self) -> Entity {
        Entity::new(
            self.x,
            self.y(),
            PIPE_WIDTH,
            SEGMENT_HEIGHT,
            EntityKind::Hazard { style: 0 },
        )
    }
}

/// Main game state.
#[derive(Debug)]
pub struct FlappyGame {
    /// True until the first flap. Physics paused meanwhile.
    pub waiting_to_start: bool,
    /// Set on pipe contact: pipes freeze, spawning stops, the bird falls.
    pub dying: bool,
    pub game_over: bool,

    pub bird_y: f64,
    pub bird_vy: f64,

    pub pipes: Vec<PipeSegment>,
    pub spawn_timer: IntervalTimer,

    pub score: ScoreBoard,
    pub flap_queued: bool,

    pub cues: CueQueue,
    pub accumulated_ms: u64,
    pub tick_count: u64,
}

impl FlappyGame {
    pub fn new() -> Self {
        Self {
            waiting_to_start: true,
            dying: false,
            game_over: false,
            bird_y: BIRD_START_Y,
            bird_vy: 0.0,
            pipes: Vec::new(),
            spawn_timer: IntervalTimer::new(SPAWN_INTERVAL_MS),
            score: ScoreBoard::new(),
            flap_queued: false,
            cues: CueQueue::new(),
            accumulated_ms: 0,
            tick_count: 0,
        }
    }

    /// The bird as a collision entity.
    pub fn bird_entity(&self) -> Entity {
        Entity::new(
            BIRD_X,
            self.bird_y,
            BIRD_SIZE,
            BIRD_SIZE,
            EntityKind::Player {
                jumping: false,
                sliding: false,
                slide_timer: 0,
            },
        )
    }

    /// Spawn a full column at the right edge with a random two-row hole.
    pub fn spawn_column<R: Rng>(&mut self, rng: &mut R) {
        let hole = rng.gen_range(1..=5u16);
        for row in 0..SEGMENT_ROWS {
            if row == hole || row == hole + HOLE_SPAN - 1 {
                continue;
            }
            self.pipes.push(PipeSegment {
                x: WORLD_WIDTH,
                row,
            });
        }
    }
}

impl Default for FlappyGame {
    fn default() -> Self {
        Self::new()
    }
}
