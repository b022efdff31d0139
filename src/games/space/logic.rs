//! Star runner logic: platform support, pickups, penalties, level ramp.

use super::types::*;
use crate::core::sound::SoundCue;
use crate::games::GameIntent;
use rand::Rng;

/// Physics tick interval in milliseconds (~60 FPS).
const PHYSICS_TICK_MS: u64 = 16;
const TICK_SECS: f64 = PHYSICS_TICK_MS as f64 / 1000.0;

/// How far below a platform top the player's feet may end a tick and still
/// count as landing on it.
const LANDING_TOLERANCE: f64 = 8.0;

/// Process one input intent.
pub fn process_intent(game: &mut SpaceGame, intent: GameIntent) {
    if game.game_over {
        return;
    }

    if game.waiting_to_start {
        if matches!(intent, GameIntent::ConfirmStart | GameIntent::Jump) {
            game.waiting_to_start = false;
            game.gravity_enabled = true;
        }
        return;
    }

    match intent {
        GameIntent::Jump => game.jump_queued = true,
        GameIntent::MoveLeft => game.nudge -= 1,
        GameIntent::MoveRight => game.nudge += 1,
        _ => {}
    }
}

/// Advance the run. Returns true if state changed.
pub fn advance<R: Rng>(game: &mut SpaceGame, dt_ms: u64, rng: &mut R) -> bool {
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
fn step<R: Rng>(game: &mut SpaceGame, rng: &mut R) {
    game.tick_count += 1;

    step_player(game);
    step_platforms(game);
    step_decor(game);
    collect_crystals(game);
    hit_rocks(game);
    step_spawns(game, rng);
    step_trickle_score(game);
    check_level_up(game);

    if game.player_y > KILL_LINE {
        game.game_over = true;
        game.cues.push(SoundCue::GameOver);
    }
}

fn step_player(game: &mut SpaceGame) {
    // Horizontal nudges, consumed all at once
    let nudge = std::mem::take(&mut game.nudge);
    game.player_x = (game.player_x + f64::from(nudge) * MOVE_NUDGE)
        .clamp(0.0, WORLD_WIDTH - PLAYER_SIZE);

    // Jump only from a platform
    if std::mem::take(&mut game.jump_queued) && game.on_platform {
        game.player_vy = JUMP_VELOCITY;
        game.on_platform = false;
        game.cues.push(SoundCue::Jump);
    }

    let prev_bottom = game.player_y + PLAYER_SIZE;

    if !game.on_platform {
        if game.gravity_enabled {
            game.player_vy += GRAVITY * TICK_SECS;
        }
        game.player_y += game.player_vy * TICK_SECS;
    }

    // Landing: the feet crossed a platform top while moving down
    if !game.on_platform && game.player_vy >= 0.0 {
        let new_bottom = game.player_y + PLAYER_SIZE;
        for platform in &game.platforms {
            let x_overlap = game.player_x + PLAYER_SIZE > platform.x
                && game.player_x < platform.x + PLATFORM_WIDTH;
            if x_overlap
                && prev_bottom <= platform.y + LANDING_TOLERANCE
                && new_bottom >= platform.y
            {
                game.player_y = platform.y - PLAYER_SIZE;
                game.player_vy = 0.0;
                game.on_platform = true;
                break;
            }
        }
    }
}

/// Drift platforms left, wrap them to the right edge, carry the player, and
/// drop support when the floor moves out from underfoot.
fn step_platforms(game: &mut SpaceGame) {
    let drift = game.drift_speed() * TICK_SECS;

    for platform in &mut game.platforms {
        platform.x -= drift;
        if platform.x + PLATFORM_WIDTH < 0.0 {
            platform.x = WORLD_WIDTH + 30.0;
        }
    }

    if game.on_platform {
        // Carried along with the floor
        game.player_x = (game.player_x - drift).max(0.0);

        let feet = game.player_y + PLAYER_SIZE;
        let supported = game.platforms.iter().any(|p| {
            let x_overlap =
                game.player_x + PLAYER_SIZE > p.x && game.player_x < p.x + PLATFORM_WIDTH;
            x_overlap && (feet - p.y).abs() <= LANDING_TOLERANCE
        });
        if !supported {
            game.on_platform = false;
            game.player_vy = 0.0;
        }
    }
}

/// Advance the idle animation phases.
fn step_decor(game: &mut SpaceGame) {
    for crystal in &mut game.crystals {
        crystal.bob += 0.05;
    }
    for rock in &mut game.rocks {
        rock.spin += 0.03;
    }
}

fn rects_overlap(ax: f64, ay: f64, aw: f64, ah: f64, bx: f64, by: f64, bw: f64, bh: f64) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

fn collect_crystals(game: &mut SpaceGame) {
    let (px, py) = (game.player_x, game.player_y);
    let before = game.crystals.len();
    game.crystals.retain(|c| {
        !rects_overlap(
            px,
            py,
            PLAYER_SIZE,
            PLAYER_SIZE,
            c.x,
            c.y,
            CRYSTAL_SIZE,
            CRYSTAL_SIZE,
        )
    });
    for _ in game.crystals.len()..before {
        game.score.award(CRYSTAL_SCORE);
        game.cues.push(SoundCue::Coin);
    }
}

/// Rock contact removes the rock and costs points; the run continues.
fn hit_rocks(game: &mut SpaceGame) {
    let (px, py) = (game.player_x, game.player_y);
    let before = game.rocks.len();
    game.rocks.retain(|r| {
        !rects_overlap(
            px,
            py,
            PLAYER_SIZE,
            PLAYER_SIZE,
            r.x,
            r.y,
            ROCK_SIZE,
            ROCK_SIZE,
        )
    });
    for _ in game.rocks.len()..before {
        game.score.penalize(ROCK_PENALTY);
    }
}

fn step_spawns<R: Rng>(game: &mut SpaceGame, rng: &mut R) {
    let level = game.level;
    if game.crystal_timer.step(PHYSICS_TICK_MS, level) {
        game.spawn_crystal(rng);
    }
    if game.rock_timer.step(PHYSICS_TICK_MS, level) {
        game.spawn_rock(rng);
    }
}

/// One point per second of survival.
fn step_trickle_score(game: &mut SpaceGame) {
    game.second_ms += PHYSICS_TICK_MS;
    if game.second_ms >= 1000 {
        game.second_ms -= 1000;
        game.score.award(1);
    }
}

fn check_level_up(game: &mut SpaceGame) {
    let new_level = (game.score.score / LEVEL_SCORE) as u32 + 1;
    if new_level > game.level {
        game.level = new_level;
        game.cues.push(SoundCue::LevelUp);
    }
}
