//! Car Rush - a retro dodge-and-shoot arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, scoring)
//! - `render`: Pure projection of simulation state onto a display surface
//! - `input`: Coalesced keyboard/touch state sampled once per tick
//! - `app`: Game loop driver wiring sim, render, audio and persistence
//! - `highscores`: Local best score plus the shared leaderboard type
//! - `server`: Optional remote high-score service (actix-web)

pub mod app;
pub mod audio;
pub mod highscores;
pub mod input;
pub mod render;
pub mod server;
pub mod settings;
pub mod sim;

pub use app::{GameApp, Snapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical play-field size (no camera, no scaling)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Nominal tick period (the display drives one tick per frame)
    pub const TICK_MS: f64 = 1000.0 / 60.0;

    /// Player car
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_START_X: f32 = 375.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    /// Base lateral/vertical speed in pixels per tick
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    /// Multiplier applied while a speed boost is active
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    pub const MAX_LIVES: u32 = 3;

    /// Obstacles
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_HEIGHT: f32 = 80.0;
    pub const OBSTACLE_SPAWN_INTERVAL_MS: f64 = 800.0;
    /// Base fall speed in pixels per tick; grows with the difficulty model
    pub const BASE_OBSTACLE_SPEED: f32 = 3.0;
    /// Active-time interval between speed levels
    pub const SPEED_INTERVAL_MS: f64 = 5000.0;
    /// Eased transition window at each level boundary
    pub const SPEED_TRANSITION_MS: f64 = 1000.0;

    /// Powerups
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const POWERUP_SPAWN_INTERVAL_MS: f64 = 8000.0;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.3;

    /// Coins
    pub const COIN_SIZE: f32 = 24.0;
    pub const COIN_FALL_SPEED: f32 = 2.5;
    pub const COIN_SPAWN_INTERVAL_MS: f64 = 3000.0;
    pub const COIN_SPAWN_CHANCE: f64 = 0.4;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 8.0;
    /// Minimum time between shots while the weapon trigger is held
    pub const SHOOT_COOLDOWN_MS: f64 = 250.0;

    /// Scoring
    pub const SURVIVAL_POINTS_PER_SEC: u64 = 10;
    pub const BULLET_KILL_POINTS: u64 = 100;
    pub const COMBO_BONUS_PER_HIT: u64 = 25;
    pub const COMBO_WINDOW_MS: f64 = 2000.0;
    pub const POWERUP_PICKUP_POINTS: u64 = 250;
    pub const LIFE_PICKUP_POINTS: u64 = 500;

    /// State machine timings
    pub const RESUME_COUNTDOWN_STEPS: u32 = 3;
    pub const RESUME_COUNTDOWN_STEP_MS: f64 = 1000.0;
    pub const GAME_OVER_ANIM_MS: f64 = 1500.0;
    /// Delay before the follow-up explosion on a bullet kill
    pub const SECONDARY_BURST_DELAY_MS: f64 = 150.0;
}
