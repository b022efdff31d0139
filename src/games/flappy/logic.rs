//! Flappy glider logic: flap physics, column scrolling, pipe collisions.

use super::types::*;
use crate::core::entity::aabb_overlap;
use crate::core::sound::SoundCue;
use crate::games::GameIntent;
use rand::Rng;

/// Physics tick interval in milliseconds (~60 FPS).
const PHYSICS_TICK_MS: u64 = 16;
/// Tick length in seconds for the per-second physics constants.
const TICK_SECS: f64 = PHYSICS_TICK_MS as f64 / 1000.0;

/// Process one input intent. Only the flap matters here.
pub fn process_intent(game: &mut FlappyGame, intent: GameIntent) {
    if game.game_over || game.dying {
        return;
    }

    if game.waiting_to_start {
        if matches!(intent, GameIntent::ConfirmStart | GameIntent::Jump) {
            game.waiting_to_start = false;
        }
        return;
    }

    if matches!(intent, GameIntent::Jump) {
        game.flap_queued = true;
    }
}

/// Advance the game. Returns true if state changed.
pub fn advance<R: Rng>(game: &mut FlappyGame, dt_ms: u64, rng: &mut R) -> bool {
    if game.game_over || game.waiting_to_start {
        return false;
    }

    let dt_ms = dt_ms.min(100);
    game.accumulated_ms += dt_ms;
    let mut changed = false;

    while game.accumulated_ms >= PHYSICS_TICK_MS {
        game.accumulated_ms -= PHYSICS_TICK_MS;
        step(game, rng);
        changed = true;

        if game.game_over {
            break;
        }
    }

    changed
}

/// Single 16 ms physics step.
fn step<R: Rng>(game: &mut FlappyGame, rng: &mut R) {
    game.tick_count += 1;

    // 1. Flap overrides the velocity outright
    if std::mem::take(&mut game.flap_queued) && !game.dying {
        game.bird_vy = FLAP_VELOCITY;
        game.cues.push(SoundCue::Jump);
    }

    // 2. Gravity + integration
    game.bird_vy += GRAVITY * TICK_SECS;
    game.bird_y += game.bird_vy * TICK_SECS;

    // 3. Leaving the vertical bounds ends the game (also how a dying bird
    //    finally exits)
    if game.bird_y < 0.0 || game.bird_y > WORLD_HEIGHT {
        game.game_over = true;
        game.cues.push(SoundCue::GameOver);
        return;
    }

    // Once dying, the world freezes and only the fall above continues
    if game.dying {
        return;
    }

    // 4. Scroll pipes; drop columns past the left edge
    for pipe in &mut game.pipes {
        pipe.x -= PIPE_SPEED * TICK_SECS;
    }
    game.pipes.retain(|p| p.x > -PIPE_WIDTH);

    // 5. Spawn the next column on the interval; the spawn is the score event
    if game.spawn_timer.step(PHYSICS_TICK_MS, 1) {
        game.spawn_column(rng);
        game.score.award(1);
        game.cues.push(SoundCue::Score);
    }

    // 6. Pipe contact starts the death fall
    let bird = game.bird_entity();
    if game
        .pipes
        .iter()
        .any(|p| aabb_overlap(&bird, &p.as_entity()))
    {
        game.dying = true;
    }
}
