//! Simulation tick
//!
//! One tick advances the whole round atomically: input, spawn attempts,
//! entity advancement, collision resolution, timer sweep, scoring, then
//! visual effects. Rendering happens after the tick and never mutates
//! state.
//!
//! Two clocks are in play. The caller passes wall-clock `now`; pause
//! bookkeeping and the resume countdown run on it. Everything inside the
//! simulation (spawn gates, effect expiries, combo window, vfx
//! timestamps) runs on *sim time* - `GameState::active_ms` - which stops
//! while paused. That single rule is what makes a long pause free of
//! difficulty jumps and silently-expired powerups.

use glam::Vec2;

use super::collision::intersects;
use super::difficulty;
use super::state::{Bullet, GameEvent, GamePhase, GameState, Powerup, TimedEffect};
use crate::consts::*;

/// Input commands for a single tick, coalesced to held-state booleans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
    /// Edge-triggered pause toggle
    pub pause: bool,
}

/// Advance the game by one tick. `now` is wall-clock milliseconds.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    if input.pause {
        match state.phase {
            GamePhase::Running => state.pause(now),
            GamePhase::Paused => state.begin_resume(now),
            _ => {}
        }
    }

    match state.phase {
        GamePhase::NotStarted | GamePhase::Paused | GamePhase::GameOver => {}
        GamePhase::Countdown { .. } => state.advance_countdown(now),
        GamePhase::GameOverAnimating { until } => {
            // Gameplay is frozen; the crash sequence keeps playing
            let sim_now = state.active_ms(now);
            state.vfx.advance(sim_now);
            if sim_now >= until {
                state.finalize_round();
            }
        }
        GamePhase::Running => run_tick(state, input, now),
    }
}

fn run_tick(state: &mut GameState, input: &TickInput, now: f64) {
    state.tick_count += 1;
    let sim_now = state.active_ms(now);

    move_player(state, input);
    handle_shooting(state, input, sim_now);

    let speed = difficulty::obstacle_speed(sim_now);
    let batch = state.spawner.poll(sim_now, speed);
    state.obstacles.extend(batch.obstacle);
    state.powerups.extend(batch.powerup);
    state.coins.extend(batch.coin);

    advance_entities(state, speed);
    resolve_collisions(state, sim_now);

    if state.phase == GamePhase::Running {
        prune_offscreen(state);
        sweep_timers(state, sim_now);
        let doubled = state.timers.is_active(TimedEffect::DoubleScore, sim_now);
        state.scoring.survival(sim_now, doubled);
    }

    state.vfx.advance(sim_now);
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    if input.left {
        player.pos.x -= player.speed;
    }
    if input.right {
        player.pos.x += player.speed;
    }
    if input.up {
        player.pos.y -= player.speed;
    }
    if input.down {
        player.pos.y += player.speed;
    }
    player.pos.x = player.pos.x.clamp(0.0, FIELD_WIDTH - player.size.x);
    player.pos.y = player.pos.y.clamp(0.0, FIELD_HEIGHT - player.size.y);
}

fn handle_shooting(state: &mut GameState, input: &TickInput, sim_now: f64) {
    if !input.shoot || !state.timers.is_active(TimedEffect::Weapon, sim_now) {
        return;
    }
    if sim_now - state.last_shot_at < SHOOT_COOLDOWN_MS {
        return;
    }
    state.last_shot_at = sim_now;

    let player = &state.player;
    state.bullets.push(Bullet {
        pos: Vec2::new(
            player.pos.x + player.size.x / 2.0 - BULLET_WIDTH / 2.0,
            player.pos.y,
        ),
        size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
        speed: BULLET_SPEED,
    });
    state.events.push(GameEvent::ShotFired);
}

fn advance_entities(state: &mut GameState, obstacle_speed: f32) {
    // All live obstacles share the model's current speed; none keeps its
    // spawn-time value.
    for obstacle in &mut state.obstacles {
        obstacle.speed = obstacle_speed;
        obstacle.pos.y += obstacle.speed;
    }
    for powerup in &mut state.powerups {
        powerup.pos.y += powerup.speed;
    }
    for coin in &mut state.coins {
        coin.pos.y += coin.speed;
    }
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed;
    }
}

/// Bounds pruning runs after collision resolution so a collision removal
/// always takes precedence within the tick.
fn prune_offscreen(state: &mut GameState) {
    state.obstacles.retain(|o| o.pos.y < FIELD_HEIGHT);
    state.powerups.retain(|p| p.pos.y < FIELD_HEIGHT);
    state.coins.retain(|c| c.pos.y < FIELD_HEIGHT);
    state.bullets.retain(|b| b.pos.y + b.size.y > 0.0);
}

/// Resolve the four collision categories in their fixed order. An entity
/// consumed by an earlier category is simply gone for later ones.
fn resolve_collisions(state: &mut GameState, sim_now: f64) {
    // 1. Player vs obstacle - skipped entirely while invulnerable
    if !state.timers.is_active(TimedEffect::Invulnerability, sim_now) {
        let player_rect = state.player.rect();
        let mut i = 0;
        while i < state.obstacles.len() {
            if intersects(&player_rect, &state.obstacles[i].rect()) {
                let obstacle = state.obstacles.remove(i);
                state.lives = state.lives.saturating_sub(1);
                state.scoring.on_damage();
                state.vfx.explosion_burst(obstacle.rect().center(), sim_now);
                state.vfx.add_shake(0.5);
                state.events.push(GameEvent::DamageTaken);
                if state.lives == 0 {
                    state.enter_game_over(sim_now);
                    return;
                }
            } else {
                i += 1;
            }
        }
    }

    // 2. Player vs powerup - resolved regardless of invulnerability
    let player_rect = state.player.rect();
    let mut i = 0;
    while i < state.powerups.len() {
        if intersects(&player_rect, &state.powerups[i].rect()) {
            let powerup = state.powerups.remove(i);
            apply_powerup(state, &powerup, sim_now);
        } else {
            i += 1;
        }
    }

    // 3. Player vs coin
    let mut i = 0;
    while i < state.coins.len() {
        if intersects(&player_rect, &state.coins[i].rect()) {
            let coin = state.coins.remove(i);
            let doubled = state.timers.is_active(TimedEffect::DoubleScore, sim_now);
            let points = state.scoring.coin(coin.kind, doubled);
            let center = coin.rect().center();
            state.vfx.pickup_sparkle(center, sim_now);
            state.vfx.score_popup(center, points, sim_now);
            state.events.push(GameEvent::CoinCollected(coin.kind));
        } else {
            i += 1;
        }
    }

    // 4. Bullet vs obstacle. Each bullet destroys at most one obstacle
    // per tick: the intersecting one whose center is nearest the
    // bullet's center, so the outcome never depends on pool order.
    let mut bi = 0;
    while bi < state.bullets.len() {
        let bullet_rect = state.bullets[bi].rect();
        let bullet_center = bullet_rect.center();

        let mut best: Option<(usize, f32)> = None;
        for (oi, obstacle) in state.obstacles.iter().enumerate() {
            if intersects(&bullet_rect, &obstacle.rect()) {
                let dist = (obstacle.rect().center() - bullet_center).length_squared();
                if best.is_none_or(|(_, d)| dist < d) {
                    best = Some((oi, dist));
                }
            }
        }

        if let Some((oi, _)) = best {
            let obstacle = state.obstacles.remove(oi);
            state.bullets.remove(bi);

            let doubled = state.timers.is_active(TimedEffect::DoubleScore, sim_now);
            let points = state.scoring.bullet_kill(sim_now, doubled);
            let center = obstacle.rect().center();
            state.vfx.explosion_burst(center, sim_now);
            state.vfx.pickup_sparkle(center, sim_now);
            state
                .vfx
                .schedule_burst(center, sim_now + SECONDARY_BURST_DELAY_MS);
            state.vfx.score_popup(center, points, sim_now);
            state.events.push(GameEvent::ObstacleDestroyed);
        } else {
            bi += 1;
        }
    }
}

fn apply_powerup(state: &mut GameState, powerup: &Powerup, sim_now: f64) {
    if let Some(effect) = powerup.kind.timed_effect() {
        state.timers.activate(effect, sim_now);
        if effect == TimedEffect::SpeedBoost {
            state.player.speed = state.player.base_speed * SPEED_BOOST_FACTOR;
        }
    } else {
        // Life is instantaneous: one extra life up to the cap
        state.lives = (state.lives + 1).min(MAX_LIVES);
    }

    let doubled = state.timers.is_active(TimedEffect::DoubleScore, sim_now);
    let points = state.scoring.pickup(powerup.kind, doubled);
    let center = powerup.rect().center();
    state.vfx.pickup_sparkle(center, sim_now);
    state.vfx.score_popup(center, points, sim_now);
    state.events.push(GameEvent::PowerupCollected(powerup.kind));
}

fn sweep_timers(state: &mut GameState, sim_now: f64) {
    // Speed boost is the only timed effect with player state to revert;
    // the others are pure `now < expiry` reads at their use sites.
    if !state.timers.is_active(TimedEffect::SpeedBoost, sim_now)
        && state.player.speed != state.player.base_speed
    {
        state.player.speed = state.player.base_speed;
    }
}
