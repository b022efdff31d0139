//! Lane runner logic: input processing, fixed-step physics, collisions.

use super::types::*;
use crate::core::entity::{aabb_overlap, player_hits_hazard, EntityKind, KindTag};
use crate::core::sound::SoundCue;
use crate::games::GameIntent;
use rand::Rng;

/// Physics tick interval in milliseconds (~60 FPS).
const PHYSICS_TICK_MS: u64 = 16;

/// Process one input intent.
pub fn process_intent(game: &mut RunnerGame, intent: GameIntent) {
    if game.game_over {
        return;
    }

    // Waiting screen: confirm or jump starts the run
    if game.waiting_to_start {
        if matches!(intent, GameIntent::ConfirmStart | GameIntent::Jump) {
            game.waiting_to_start = false;
        }
        return;
    }

    match intent {
        GameIntent::MoveLeft => {
            if game.current_lane > 0 {
                game.current_lane -= 1;
            }
        }
        GameIntent::MoveRight => {
            if game.current_lane + 1 < LANE_COUNT {
                game.current_lane += 1;
            }
        }
        GameIntent::Jump => game.jump_queued = true,
        GameIntent::Slide => game.slide_queued = true,
        _ => {}
    }
}

/// Advance the run. `dt_ms` is milliseconds since the last call; physics
/// steps internally in 16 ms increments. Returns true if state changed.
pub fn advance<R: Rng>(game: &mut RunnerGame, dt_ms: u64, rng: &mut R) -> bool {
    if game.game_over || game.waiting_to_start {
        return false;
    }

    // Clamp dt to keep a stalled frame from exploding into a catch-up burst
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
fn step<R: Rng>(game: &mut RunnerGame, rng: &mut R) {
    game.tick_count += 1;

    step_player(game);
    step_spawns(game, rng);
    step_scroll(game);
    step_particles(game);
    collect_coins(game, rng);
    check_hazards(game);

    if game.game_over {
        return;
    }

    // Score accrues with forward motion; distance backs the level counter.
    game.score.award(game.speed as u64);
    game.distance_accum += game.speed / 10.0;
    game.score.distance = game.distance_accum as u64;

    game.speed = (game.speed + SPEED_RAMP).min(MAX_SPEED);
}

/// Consume buffered inputs, integrate the player, tick the slide timer,
/// and snap x to the current lane.
fn step_player(game: &mut RunnerGame) {
    let jump = std::mem::take(&mut game.jump_queued);
    let slide = std::mem::take(&mut game.slide_queued);
    let lane_x = LANE_CENTERS[game.current_lane];
    let mut jumped = false;

    if let Some(player) = game.entities.get_mut(game.player) {
        if let EntityKind::Player {
            jumping,
            sliding,
            slide_timer,
        } = &mut player.kind
        {
            if jump && !*jumping && !*sliding {
                player.vy = JUMP_IMPULSE;
                *jumping = true;
                jumped = true;
            }
            if slide && !*sliding && !*jumping {
                *sliding = true;
                *slide_timer = SLIDE_TICKS;
                player.height = SLIDE_HEIGHT;
            }
        }

        player.vy += GRAVITY;
        player.y += player.vy;

        // Ground clamp ends the jump
        if player.y > GROUND_Y {
            player.y = GROUND_Y;
            player.vy = 0.0;
            if let EntityKind::Player { jumping, .. } = &mut player.kind {
                *jumping = false;
            }
        }

        if let EntityKind::Player {
            sliding,
            slide_timer,
            ..
        } = &mut player.kind
        {
            if *sliding {
                *slide_timer = slide_timer.saturating_sub(1);
                if *slide_timer == 0 {
                    *sliding = false;
                    player.height = PLAYER_HEIGHT;
                }
            }
        }

        player.x = lane_x - player.width / 2.0;
    }

    if jumped {
        game.cues.push(SoundCue::Jump);
    }
}

/// Tick both spawn timers, spawning on fire.
fn step_spawns<R: Rng>(game: &mut RunnerGame, rng: &mut R) {
    let level = game.level();
    if game.hazard_timer.step(level, rng) {
        game.spawn_hazard(rng);
    }
    if game.coin_timer.step(level, rng) {
        game.spawn_coin(rng);
    }
}

/// Scroll hazards and coins down; release anything past the bottom edge.
fn step_scroll(game: &mut RunnerGame) {
    let speed = game.speed;
    game.entities
        .for_each_active(KindTag::Hazard, |_, e| e.y += speed);
    game.entities.for_each_active(KindTag::Collectible, |_, e| {
        e.y += speed;
        if let EntityKind::Collectible { spin } = &mut e.kind {
            *spin += 0.1;
        }
    });

    game.entities
        .retain(KindTag::Hazard, |e| e.y <= WORLD_HEIGHT);
    game.entities
        .retain(KindTag::Collectible, |e| e.y <= WORLD_HEIGHT);
}

/// Integrate particles and release the expired ones.
fn step_particles(game: &mut RunnerGame) {
    game.entities.for_each_active(KindTag::Particle, |_, e| {
        e.x += e.vx * 0.1;
        e.y += e.vy * 0.1;
        e.vy += 5.0;
        if let EntityKind::Particle { life, .. } = &mut e.kind {
            *life = life.saturating_sub(1);
        }
    });
    game.entities.retain(KindTag::Particle, |e| {
        matches!(e.kind, EntityKind::Particle { life, .. } if life > 0)
    });
}

/// Player-coin overlaps: release the coin, score it, burst particles.
fn collect_coins<R: Rng>(game: &mut RunnerGame, rng: &mut R) {
    let player = match game.entities.get(game.player) {
        Some(p) => p.clone(),
        None => return,
    };

    let mut bursts = Vec::new();
    for id in game.entities.ids_of(KindTag::Collectible) {
        let hit = game
            .entities
            .get(id)
            .is_some_and(|coin| aabb_overlap(&player, coin));
        if hit {
            if let Some(coin) = game.entities.get(id) {
                bursts.push((coin.x, coin.y));
            }
            game.entities.release(id);
            game.score.award(COIN_SCORE);
            game.score.coins += 1;
            game.cues.push(SoundCue::Coin);
        }
    }
    for (x, y) in bursts {
        game.spawn_coin_burst(x, y, rng);
    }
}

/// Player-hazard overlaps end the run, unless cleared by a jump.
fn check_hazards(game: &mut RunnerGame) {
    let player = match game.entities.get(game.player) {
        Some(p) => p.clone(),
        None => return,
    };

    for id in game.entities.ids_of(KindTag::Hazard) {
        let hit = game
            .entities
            .get(id)
            .is_some_and(|hazard| player_hits_hazard(&player, hazard));
        if hit {
            game.game_over = true;
            game.cues.push(SoundCue::GameOver);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::store::MAX_HAZARDS;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// A game already past the start screen, with spawns held back so tests
    /// control the population.
    fn started_game() -> RunnerGame {
        let mut game = RunnerGame::new();
        game.waiting_to_start = false;
        game.hazard_timer.suppress();
        game.coin_timer.suppress();
        game
    }

    fn hazard_at(x: f64, y: f64) -> Entity {
        Entity::new(x, y, 60.0, 40.0, EntityKind::Hazard { style: 0 })
    }

    fn coin_at(x: f64, y: f64) -> Entity {
        Entity::new(x, y, COIN_SIZE, COIN_SIZE, EntityKind::Collectible { spin: 0.0 })
    }

    // ── Start / input ──

    #[test]
    fn test_waiting_blocks_physics() {
        let mut game = RunnerGame::new();
        let changed = advance(&mut game, 100, &mut rng());
        assert!(!changed);
        assert_eq!(game.tick_count, 0);
    }

    #[test]
    fn test_jump_intent_starts_game() {
        let mut game = RunnerGame::new();
        process_intent(&mut game, GameIntent::Jump);
        assert!(!game.waiting_to_start);
        // The starting press is not also a jump
        assert!(!game.jump_queued);
    }

    #[test]
    fn test_lane_changes_clamp_at_edges() {
        let mut game = started_game();
        process_intent(&mut game, GameIntent::MoveLeft);
        process_intent(&mut game, GameIntent::MoveLeft);
        process_intent(&mut game, GameIntent::MoveLeft);
        assert_eq!(game.current_lane, 0);
        for _ in 0..5 {
            process_intent(&mut game, GameIntent::MoveRight);
        }
        assert_eq!(game.current_lane, LANE_COUNT - 1);
    }

    #[test]
    fn test_player_follows_lane() {
        let mut game = started_game();
        process_intent(&mut game, GameIntent::MoveLeft);
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        let player = game.entities.get(game.player).unwrap();
        assert!((player.x - (LANE_CENTERS[0] - PLAYER_WIDTH / 2.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut game = started_game();
        game.game_over = true;
        process_intent(&mut game, GameIntent::Jump);
        assert!(!game.jump_queued);
    }

    // ── Jump / slide ──

    #[test]
    fn test_jump_launches_player() {
        let mut game = started_game();
        process_intent(&mut game, GameIntent::Jump);
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());

        let player = game.entities.get(game.player).unwrap();
        assert!(player.is_jumping());
        assert!(player.y < GROUND_Y);
        assert!(game.cues.contains(SoundCue::Jump));
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut game = started_game();
        process_intent(&mut game, GameIntent::Jump);

        let mut apex = GROUND_Y;
        for _ in 0..200 {
            advance(&mut game, PHYSICS_TICK_MS, &mut rng());
            let y = game.entities.get(game.player).unwrap().y;
            apex = apex.min(y);
            if !game.entities.get(game.player).unwrap().is_jumping() && game.tick_count > 2 {
                break;
            }
        }

        assert!(apex < GROUND_Y - 100.0, "jump should gain real height");
        let player = game.entities.get(game.player).unwrap();
        assert!((player.y - GROUND_Y).abs() < f64::EPSILON);
        assert!(!player.is_jumping());
    }

    #[test]
    fn test_no_double_jump() {
        let mut game = started_game();
        process_intent(&mut game, GameIntent::Jump);
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        let vy_airborne = game.entities.get(game.player).unwrap().vy;

        // Second jump while airborne is consumed without effect
        process_intent(&mut game, GameIntent::Jump);
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        let player = game.entities.get(game.player).unwrap();
        assert!(
            player.vy > vy_airborne,
            "gravity keeps pulling; no second impulse"
        );
    }

    #[test]
    fn test_slide_shrinks_hitbox_then_restores() {
        let mut game = started_game();
        process_intent(&mut game, GameIntent::Slide);
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());

        let player = game.entities.get(game.player).unwrap();
        assert!(player.is_sliding());
        assert!((player.height - SLIDE_HEIGHT).abs() < f64::EPSILON);

        // Run out the slide timer
        for _ in 0..SLIDE_TICKS + 1 {
            advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        }
        let player = game.entities.get(game.player).unwrap();
        assert!(!player.is_sliding());
        assert!((player.height - PLAYER_HEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_slide_while_jumping() {
        let mut game = started_game();
        process_intent(&mut game, GameIntent::Jump);
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());

        process_intent(&mut game, GameIntent::Slide);
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        assert!(!game.entities.get(game.player).unwrap().is_sliding());
    }

    // ── Scrolling / cleanup ──

    #[test]
    fn test_hazards_scroll_down() {
        let mut game = started_game();
        let id = game.entities.spawn(hazard_at(370.0, 100.0)).unwrap();
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        assert!(game.entities.get(id).unwrap().y > 100.0);
    }

    #[test]
    fn test_offscreen_entities_released_to_pool() {
        let mut game = started_game();
        game.entities.spawn(hazard_at(370.0, WORLD_HEIGHT + 1.0));
        game.entities.spawn(coin_at(370.0, WORLD_HEIGHT + 1.0));

        advance(&mut game, PHYSICS_TICK_MS, &mut rng());

        assert_eq!(game.entities.active_count(KindTag::Hazard), 0);
        assert_eq!(game.entities.active_count(KindTag::Collectible), 0);
    }

    #[test]
    fn test_speed_ramps_and_caps() {
        let mut game = started_game();
        // Park the player away from everything and run a long while
        game.speed = MAX_SPEED - 0.005;
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        assert!((game.speed - MAX_SPEED).abs() < SPEED_RAMP);
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        assert!(game.speed <= MAX_SPEED);
    }

    // ── Coins ──

    #[test]
    fn test_coin_pickup_scores_and_bursts() {
        let mut game = started_game();
        let player = game.entities.get(game.player).unwrap().clone();
        game.entities.spawn(coin_at(player.x, player.y));

        advance(&mut game, PHYSICS_TICK_MS, &mut rng());

        assert_eq!(game.score.coins, 1);
        assert!(game.score.score >= COIN_SCORE);
        assert_eq!(game.entities.active_count(KindTag::Collectible), 0);
        assert_eq!(
            game.entities.active_count(KindTag::Particle),
            COIN_BURST_PARTICLES
        );
        assert!(game.cues.contains(SoundCue::Coin));
    }

    #[test]
    fn test_particles_expire_and_release() {
        let mut game = started_game();
        let player = game.entities.get(game.player).unwrap().clone();
        game.entities.spawn(coin_at(player.x, player.y));
        advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        assert!(game.entities.active_count(KindTag::Particle) > 0);

        for _ in 0..(PARTICLE_LIFE_TICKS + 2) {
            advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        }
        assert_eq!(game.entities.active_count(KindTag::Particle), 0);
    }

    // ── Hazards ──

    #[test]
    fn test_hazard_contact_ends_run() {
        let mut game = started_game();
        let player = game.entities.get(game.player).unwrap().clone();
        game.entities.spawn(hazard_at(player.x, player.y));

        advance(&mut game, PHYSICS_TICK_MS, &mut rng());

        assert!(game.game_over);
        assert!(game.cues.contains(SoundCue::GameOver));
    }

    #[test]
    fn test_game_over_halts_stepping() {
        let mut game = started_game();
        game.game_over = true;
        let ticks = game.tick_count;
        assert!(!advance(&mut game, 100, &mut rng()));
        assert_eq!(game.tick_count, ticks);
    }

    #[test]
    fn test_jump_clears_hazard_below() {
        let mut game = started_game();
        // Airborne player well above a hazard that shares its lane
        {
            let player = game.entities.get_mut(game.player).unwrap();
            player.y = GROUND_Y - 200.0;
            player.vy = 0.0;
            if let EntityKind::Player { jumping, .. } = &mut player.kind {
                *jumping = true;
            }
        }
        let player = game.entities.get(game.player).unwrap().clone();
        // Raw boxes will intersect after the scroll step, but the player's
        // feet stay above the hazard's top within the clearance tolerance.
        game.entities.spawn(hazard_at(player.x, 250.0));

        advance(&mut game, PHYSICS_TICK_MS, &mut rng());

        assert!(!game.game_over, "airborne player clears the hazard");
    }

    // ── Caps end-to-end ──

    #[test]
    fn test_sixteenth_hazard_spawn_is_dropped() {
        let mut game = started_game();
        let mut r = rng();
        for _ in 0..MAX_HAZARDS {
            game.spawn_hazard(&mut r);
        }
        assert_eq!(game.entities.active_count(KindTag::Hazard), MAX_HAZARDS);

        game.spawn_hazard(&mut r);
        assert_eq!(
            game.entities.active_count(KindTag::Hazard),
            MAX_HAZARDS,
            "spawn past the cap is silently dropped"
        );
    }

    // ── Timing ──

    #[test]
    fn test_dt_clamped() {
        let mut game = started_game();
        advance(&mut game, 5000, &mut rng());
        assert!(game.tick_count <= 7, "clamped to ~6 ticks of catch-up");
    }

    #[test]
    fn test_each_logical_tick_steps_once() {
        let mut game = started_game();
        // 4 * 16ms delivered in uneven chunks still yields exactly 4 ticks
        advance(&mut game, 10, &mut rng());
        advance(&mut game, 22, &mut rng());
        advance(&mut game, 16, &mut rng());
        advance(&mut game, 16, &mut rng());
        assert_eq!(game.tick_count, 4);
    }

    #[test]
    fn test_distance_and_score_accrue() {
        let mut game = started_game();
        for _ in 0..50 {
            advance(&mut game, PHYSICS_TICK_MS, &mut rng());
        }
        assert!(game.score.score > 0);
        assert!(game.score.distance > 0);
    }
}
