//! Game entities and rectangle collision tests.
//!
//! Entities are plain data: a rectangle, a velocity, and a kind tag whose
//! payload carries the handful of fields that differ between kinds. The
//! games drive all behavior from the tag, so there is no trait hierarchy.

/// Kind tag with per-kind payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Player {
        jumping: bool,
        sliding: bool,
        /// Ticks of slide remaining; 0 when not sliding.
        slide_timer: u32,
    },
    Hazard {
        /// Index into the game's hazard style table (size/appearance).
        style: u8,
    },
    Collectible {
        /// Rotation phase, advanced each tick for rendering.
        spin: f64,
    },
    Particle {
        /// Ticks of life remaining; released at 0.
        life: u32,
        max_life: u32,
    },
}

/// Payload-free discriminant of [`EntityKind`], used for pool accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Player,
    Hazard,
    Collectible,
    Particle,
}

impl KindTag {
    pub const ALL: [KindTag; 4] = [
        KindTag::Player,
        KindTag::Hazard,
        KindTag::Collectible,
        KindTag::Particle,
    ];

    pub fn index(self) -> usize {
        match self {
            KindTag::Player => 0,
            KindTag::Hazard => 1,
            KindTag::Collectible => 2,
            KindTag::Particle => 3,
        }
    }
}

impl EntityKind {
    pub fn tag(&self) -> KindTag {
        match self {
            EntityKind::Player { .. } => KindTag::Player,
            EntityKind::Hazard { .. } => KindTag::Hazard,
            EntityKind::Collectible { .. } => KindTag::Collectible,
            EntityKind::Particle { .. } => KindTag::Particle,
        }
    }
}

/// A single game object: axis-aligned rectangle plus velocity and kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub vx: f64,
    pub vy: f64,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(x: f64, y: f64, width: f64, height: f64, kind: EntityKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            vx: 0.0,
            vy: 0.0,
            kind,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.kind, EntityKind::Player { jumping: true, .. })
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.kind, EntityKind::Player { sliding: true, .. })
    }
}

/// How far above a hazard's top edge the player's feet may be (while
/// airborne) for the overlap to count as a clean jump-over.
pub const JUMP_CLEAR_TOLERANCE: f64 = 10.0;

/// Strict axis-aligned bounding-box overlap. Symmetric in its arguments;
/// boxes that merely touch along an edge do not overlap.
pub fn aabb_overlap(a: &Entity, b: &Entity) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Player-versus-hazard test with jump-over suppression: an airborne player
/// whose feet are above the hazard's top (within [`JUMP_CLEAR_TOLERANCE`])
/// clears the hazard even when the raw boxes intersect.
pub fn player_hits_hazard(player: &Entity, hazard: &Entity) -> bool {
    if player.is_jumping() && player.bottom() < hazard.y + JUMP_CLEAR_TOLERANCE {
        return false;
    }
    aabb_overlap(player, hazard)
}
