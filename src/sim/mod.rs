//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One atomic tick per frame, driven by the caller
//! - Seeded RNG only
//! - One simulation timestamp captured per tick and threaded through
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod vfx;

pub use collision::{Rect, intersects};
pub use difficulty::{ease_out_cubic, obstacle_speed};
pub use score::Scoring;
pub use spawn::{SpawnBatch, Spawner};
pub use state::{
    Bullet, Coin, CoinKind, EffectTimers, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind,
    Player, Powerup, PowerupKind, TimedEffect,
};
pub use tick::{TickInput, tick};
pub use vfx::{Explosion, Particle, ParticleTint, ScorePopup, Vfx};
