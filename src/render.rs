//! Render pass
//!
//! A pure projection of simulation state to draw calls on a `Surface`.
//! Nothing in here mutates gameplay state - entity creation for effects
//! happens in the tick's effect step, never at draw time - so a round can
//! be simulated and tested without any display at all.
//!
//! Sprites are optional: any entity whose image has not loaded falls back
//! to a solid-color rectangle instead of failing the frame.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{
    CoinKind, GamePhase, GameState, ObstacleKind, PowerupKind, Rect, TimedEffect,
};

/// 0xRRGGBB
pub type Color = u32;

pub const BLACK: Color = 0x000000;
pub const WHITE: Color = 0xFFFFFF;
pub const ROAD_GRAY: Color = 0x333333;
pub const PLAYER_GREEN: Color = 0x00FF00;
pub const OBSTACLE_RED: Color = 0xFF0000;
pub const OBSTACLE_BLUE: Color = 0x4169E1;
pub const GOLD: Color = 0xFFD700;
pub const HEART_PINK: Color = 0xFF69B4;
pub const BOLT_CYAN: Color = 0x00FFFF;
pub const GUN_BROWN: Color = 0x8B4513;
pub const STAR_PURPLE: Color = 0xB041FF;
pub const FIRE_ORANGE: Color = 0xFF8C00;
pub const COIN_BRONZE: Color = 0xCD7F32;
pub const COIN_SILVER: Color = 0xC0C0C0;
pub const COIN_DIAMOND: Color = 0x9FF4FF;

/// Image assets the surface may or may not have loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    PlayerCar,
    RedCar,
    BlueCar,
    LifeIcon,
    BoltIcon,
    ShieldIcon,
    GunIcon,
    StarIcon,
    BronzeCoin,
    SilverCoin,
    GoldCoin,
    DiamondCoin,
}

/// The narrow display contract the game draws through.
///
/// `push_layer`/`pop_layer` provide the global translate + alpha used for
/// screen shake and effect compositing.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    fn draw_text(&mut self, pos: Vec2, text: &str, color: Color, size: f32);
    fn has_sprite(&self, sprite: SpriteId) -> bool;
    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect);
    fn push_layer(&mut self, offset: Vec2, alpha: f32);
    fn pop_layer(&mut self);
}

/// Surface that draws nothing; headless runs and benchmarks
pub struct NullSurface;

impl Surface for NullSurface {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _line_width: f32) {}
    fn draw_text(&mut self, _pos: Vec2, _text: &str, _color: Color, _size: f32) {}
    fn has_sprite(&self, _sprite: SpriteId) -> bool {
        false
    }
    fn draw_sprite(&mut self, _sprite: SpriteId, _rect: Rect) {}
    fn push_layer(&mut self, _offset: Vec2, _alpha: f32) {}
    fn pop_layer(&mut self) {}
}

fn obstacle_sprite(kind: ObstacleKind) -> (SpriteId, Color) {
    match kind {
        ObstacleKind::Red => (SpriteId::RedCar, OBSTACLE_RED),
        ObstacleKind::Blue => (SpriteId::BlueCar, OBSTACLE_BLUE),
    }
}

fn powerup_sprite(kind: PowerupKind) -> (SpriteId, Color) {
    match kind {
        PowerupKind::Life => (SpriteId::LifeIcon, HEART_PINK),
        PowerupKind::SpeedBoost => (SpriteId::BoltIcon, BOLT_CYAN),
        PowerupKind::Invulnerability => (SpriteId::ShieldIcon, GOLD),
        PowerupKind::Weapon => (SpriteId::GunIcon, GUN_BROWN),
        PowerupKind::DoubleScore => (SpriteId::StarIcon, STAR_PURPLE),
    }
}

fn coin_sprite(kind: CoinKind) -> (SpriteId, Color) {
    match kind {
        CoinKind::Bronze => (SpriteId::BronzeCoin, COIN_BRONZE),
        CoinKind::Silver => (SpriteId::SilverCoin, COIN_SILVER),
        CoinKind::Gold => (SpriteId::GoldCoin, GOLD),
        CoinKind::Diamond => (SpriteId::DiamondCoin, COIN_DIAMOND),
    }
}

/// Sprite with solid-color fallback when the asset isn't available
fn draw_entity(surface: &mut dyn Surface, sprite: SpriteId, fallback: Color, rect: Rect) {
    if surface.has_sprite(sprite) {
        surface.draw_sprite(sprite, rect);
    } else {
        surface.fill_rect(rect, fallback);
    }
}

/// Deterministic shake offset for this frame
fn shake_offset(state: &GameState) -> Vec2 {
    if state.vfx.shake <= 0.0 {
        return Vec2::ZERO;
    }
    let h = (state.tick_count as u32).wrapping_mul(2654435761);
    let dx = ((h % 1000) as f32 / 1000.0 - 0.5) * 12.0;
    let dy = (((h >> 10) % 1000) as f32 / 1000.0 - 0.5) * 12.0;
    Vec2::new(dx, dy) * state.vfx.shake
}

/// Draw one frame. `now` is wall-clock milliseconds; all effect ages are
/// computed from the frozen-while-paused simulation clock.
pub fn render(state: &GameState, surface: &mut dyn Surface, now: f64) {
    let sim_now = state.sim_time(now);

    surface.fill_rect(
        Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT),
        BLACK,
    );

    surface.push_layer(shake_offset(state), 1.0);

    draw_road(surface, sim_now);
    draw_entities(state, surface, sim_now);
    draw_effects(state, surface, sim_now);

    surface.pop_layer();

    draw_hud(state, surface, sim_now);
    draw_overlay(state, surface);
}

fn draw_road(surface: &mut dyn Surface, sim_now: f64) {
    // Scrolling dashed lane markers
    let scroll = ((sim_now / 10.0) % 60.0) as f32;
    let mut y = -60.0;
    while y < FIELD_HEIGHT {
        surface.fill_rect(
            Rect::new(FIELD_WIDTH / 3.0, y + scroll, 4.0, 30.0),
            ROAD_GRAY,
        );
        surface.fill_rect(
            Rect::new(FIELD_WIDTH * 2.0 / 3.0, y + scroll, 4.0, 30.0),
            ROAD_GRAY,
        );
        y += 60.0;
    }
}

fn draw_entities(state: &GameState, surface: &mut dyn Surface, sim_now: f64) {
    for obstacle in &state.obstacles {
        let (sprite, fallback) = obstacle_sprite(obstacle.kind);
        draw_entity(surface, sprite, fallback, obstacle.rect());
    }
    for powerup in &state.powerups {
        let (sprite, fallback) = powerup_sprite(powerup.kind);
        draw_entity(surface, sprite, fallback, powerup.rect());
    }
    for coin in &state.coins {
        let (sprite, fallback) = coin_sprite(coin.kind);
        draw_entity(surface, sprite, fallback, coin.rect());
    }
    for bullet in &state.bullets {
        surface.fill_rect(bullet.rect(), WHITE);
    }

    draw_entity(
        surface,
        SpriteId::PlayerCar,
        PLAYER_GREEN,
        state.player.rect(),
    );
    if state.timers.is_active(TimedEffect::Invulnerability, sim_now) {
        let r = state.player.rect();
        surface.stroke_rect(
            Rect::new(r.pos.x - 2.0, r.pos.y - 2.0, r.size.x + 4.0, r.size.y + 4.0),
            GOLD,
            3.0,
        );
    }
}

fn draw_effects(state: &GameState, surface: &mut dyn Surface, sim_now: f64) {
    for explosion in &state.vfx.explosions {
        let age = explosion.age_frac(sim_now);
        let radius = 10.0 + age * 40.0;
        surface.push_layer(Vec2::ZERO, 1.0 - age);
        surface.stroke_rect(
            Rect::new(
                explosion.pos.x - radius,
                explosion.pos.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
            FIRE_ORANGE,
            4.0,
        );
        surface.pop_layer();
    }

    for particle in &state.vfx.particles {
        let life = particle.life_frac(sim_now);
        if life <= 0.0 {
            continue;
        }
        let color = match particle.tint {
            crate::sim::ParticleTint::Fire => FIRE_ORANGE,
            crate::sim::ParticleTint::Spark => WHITE,
            crate::sim::ParticleTint::Sparkle => GOLD,
        };
        surface.push_layer(Vec2::ZERO, life);
        surface.fill_rect(
            Rect::new(particle.pos.x, particle.pos.y, particle.size, particle.size),
            color,
        );
        surface.pop_layer();
    }

    for popup in &state.vfx.popups {
        let age = popup.age_frac(sim_now);
        surface.push_layer(Vec2::new(0.0, -age * 24.0), 1.0 - age);
        surface.draw_text(
            popup.pos,
            &format!("+{}", popup.amount),
            GOLD,
            14.0,
        );
        surface.pop_layer();
    }
}

fn draw_hud(state: &GameState, surface: &mut dyn Surface, sim_now: f64) {
    // Lives as filled/hollow boxes
    for i in 0..MAX_LIVES {
        let rect = Rect::new(16.0 + i as f32 * 28.0, 16.0, 22.0, 22.0);
        let color = if i < state.lives { HEART_PINK } else { ROAD_GRAY };
        surface.fill_rect(rect, color);
    }

    surface.draw_text(
        Vec2::new(FIELD_WIDTH / 2.0 - 40.0, 20.0),
        &format!("{:06}", state.scoring.score),
        WHITE,
        20.0,
    );
    if state.scoring.combo > 1 {
        surface.draw_text(
            Vec2::new(FIELD_WIDTH / 2.0 - 40.0, 44.0),
            &format!("COMBO x{}", state.scoring.combo),
            BOLT_CYAN,
            14.0,
        );
    }

    // Active effect labels with remaining time
    let mut label_y = 16.0;
    for effect in TimedEffect::ALL {
        if state.timers.is_active(effect, sim_now) {
            let label = match effect {
                TimedEffect::SpeedBoost => "SPEED",
                TimedEffect::Invulnerability => "SHIELD",
                TimedEffect::Weapon => "GUN",
                TimedEffect::DoubleScore => "x2 SCORE",
            };
            let secs = state.timers.remaining_ms(effect, sim_now) / 1000.0;
            surface.draw_text(
                Vec2::new(FIELD_WIDTH - 140.0, label_y),
                &format!("{} {:.0}s", label, secs.ceil()),
                WHITE,
                12.0,
            );
            label_y += 18.0;
        }
    }
}

fn draw_overlay(state: &GameState, surface: &mut dyn Surface) {
    let center = Vec2::new(FIELD_WIDTH / 2.0 - 60.0, FIELD_HEIGHT / 2.0);
    match state.phase {
        GamePhase::Paused => {
            surface.draw_text(center, "PAUSED", GOLD, 32.0);
        }
        GamePhase::Countdown { remaining, .. } => {
            surface.draw_text(center, &format!("{remaining}"), WHITE, 48.0);
        }
        GamePhase::GameOverAnimating { .. } | GamePhase::GameOver => {
            surface.draw_text(center, "GAME OVER", OBSTACLE_RED, 32.0);
            surface.draw_text(
                center + Vec2::new(0.0, 40.0),
                &format!("FINAL SCORE {:06}", state.scoring.score),
                WHITE,
                16.0,
            );
        }
        _ => {}
    }
}
