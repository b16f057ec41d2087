//! Game state and core simulation types
//!
//! One `GameState` value owns everything a round mutates. The tick loop is
//! the only writer; the presentation layer reads a snapshot between ticks.

use glam::Vec2;

use super::collision::Rect;
use super::score::Scoring;
use super::spawn::Spawner;
use super::vfx::Vfx;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamePhase {
    /// Menu is up, no round exists yet
    NotStarted,
    /// Active gameplay
    Running,
    /// Simulation halted, waiting for a resume command
    Paused,
    /// Resume countdown; simulation stays halted while the display counts
    Countdown { remaining: u32, next_step_at: f64 },
    /// Lives hit zero; the crash sequence plays out before finalizing
    GameOverAnimating { until: f64 },
    /// Round finalized
    GameOver,
}

/// Obstacle visual variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Red,
    Blue,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Red, ObstacleKind::Blue];
}

/// Powerup variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Life,
    SpeedBoost,
    Invulnerability,
    Weapon,
    DoubleScore,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 5] = [
        PowerupKind::Life,
        PowerupKind::SpeedBoost,
        PowerupKind::Invulnerability,
        PowerupKind::Weapon,
        PowerupKind::DoubleScore,
    ];

    /// Sprite dimensions vary per kind to keep each icon's aspect ratio
    pub fn size(self) -> Vec2 {
        match self {
            PowerupKind::Weapon => Vec2::new(36.0, 24.0),
            PowerupKind::Life
            | PowerupKind::SpeedBoost
            | PowerupKind::Invulnerability
            | PowerupKind::DoubleScore => Vec2::new(30.0, 30.0),
        }
    }

    /// The timer slot this powerup drives, if any (Life is instantaneous)
    pub fn timed_effect(self) -> Option<TimedEffect> {
        match self {
            PowerupKind::Life => None,
            PowerupKind::SpeedBoost => Some(TimedEffect::SpeedBoost),
            PowerupKind::Invulnerability => Some(TimedEffect::Invulnerability),
            PowerupKind::Weapon => Some(TimedEffect::Weapon),
            PowerupKind::DoubleScore => Some(TimedEffect::DoubleScore),
        }
    }

    /// Flat score bonus for picking this powerup up
    pub fn pickup_points(self) -> u64 {
        match self {
            PowerupKind::Life => LIFE_PICKUP_POINTS,
            _ => POWERUP_PICKUP_POINTS,
        }
    }
}

/// Coin variants and their point values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinKind {
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl CoinKind {
    pub const ALL: [CoinKind; 4] = [
        CoinKind::Bronze,
        CoinKind::Silver,
        CoinKind::Gold,
        CoinKind::Diamond,
    ];

    pub fn value(self) -> u64 {
        match self {
            CoinKind::Bronze => 25,
            CoinKind::Silver => 50,
            CoinKind::Gold => 100,
            CoinKind::Diamond => 250,
        }
    }
}

/// The player's car
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick; temporarily scaled by an active speed boost
    pub speed: f32,
    pub base_speed: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_BASE_SPEED,
            base_speed: PLAYER_BASE_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A falling obstacle car
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Re-stamped from the difficulty model every tick
    pub speed: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A falling powerup pickup
#[derive(Debug, Clone)]
pub struct Powerup {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub kind: PowerupKind,
}

impl Powerup {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A falling collectible coin
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub kind: CoinKind,
}

impl Coin {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A player bullet, moving upward
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Timed powerup effects, one expiry slot each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedEffect {
    SpeedBoost,
    Invulnerability,
    Weapon,
    DoubleScore,
}

impl TimedEffect {
    pub const ALL: [TimedEffect; 4] = [
        TimedEffect::SpeedBoost,
        TimedEffect::Invulnerability,
        TimedEffect::Weapon,
        TimedEffect::DoubleScore,
    ];

    pub fn duration_ms(self) -> f64 {
        match self {
            TimedEffect::SpeedBoost => 5000.0,
            TimedEffect::Invulnerability => 3000.0,
            TimedEffect::Weapon => 5000.0,
            TimedEffect::DoubleScore => 10000.0,
        }
    }

    fn index(self) -> usize {
        match self {
            TimedEffect::SpeedBoost => 0,
            TimedEffect::Invulnerability => 1,
            TimedEffect::Weapon => 2,
            TimedEffect::DoubleScore => 3,
        }
    }
}

/// Expiry table for all timed effects.
///
/// Re-collecting a powerup overwrites its slot; effects never stack.
#[derive(Debug, Clone, Default)]
pub struct EffectTimers {
    expires_at: [f64; 4],
}

impl EffectTimers {
    /// Arm `kind` for its full duration starting at `now`
    pub fn activate(&mut self, kind: TimedEffect, now: f64) {
        self.expires_at[kind.index()] = now + kind.duration_ms();
    }

    pub fn is_active(&self, kind: TimedEffect, now: f64) -> bool {
        now < self.expires_at[kind.index()]
    }

    /// Remaining duration, zero when expired (HUD display)
    pub fn remaining_ms(&self, kind: TimedEffect, now: f64) -> f64 {
        (self.expires_at[kind.index()] - now).max(0.0)
    }

    pub fn clear(&mut self) {
        self.expires_at = [0.0; 4];
    }
}

/// Gameplay events drained by the shell once per tick (audio cues etc.)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    PowerupCollected(PowerupKind),
    CoinCollected(CoinKind),
    ObstacleDestroyed,
    DamageTaken,
    RoundOver { final_score: u64 },
}

/// Complete round state, owned by the tick loop
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub phase: GamePhase,
    pub lives: u32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<Powerup>,
    pub coins: Vec<Coin>,
    pub bullets: Vec<Bullet>,
    pub spawner: Spawner,
    pub timers: EffectTimers,
    pub scoring: Scoring,
    /// Cosmetic only - never read by collision or scoring
    pub vfx: Vfx,
    pub tick_count: u64,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) round_started_at: f64,
    pub(crate) paused_total_ms: f64,
    pub(crate) pause_started_at: f64,
    pub(crate) last_shot_at: f64,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::NotStarted,
            lives: MAX_LIVES,
            player: Player::new(),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            coins: Vec::new(),
            bullets: Vec::new(),
            spawner: Spawner::new(seed),
            timers: EffectTimers::default(),
            scoring: Scoring::default(),
            vfx: Vfx::default(),
            tick_count: 0,
            events: Vec::new(),
            round_started_at: 0.0,
            paused_total_ms: 0.0,
            pause_started_at: 0.0,
            last_shot_at: f64::NEG_INFINITY,
        }
    }

    /// Reset every pool, counter and timer, then enter `Running`.
    ///
    /// Used for both first start and restart; only the persisted best
    /// score survives across rounds, and that lives outside this type.
    pub fn start_round(&mut self, now: f64) {
        self.phase = GamePhase::Running;
        self.lives = MAX_LIVES;
        self.player = Player::new();
        self.obstacles.clear();
        self.powerups.clear();
        self.coins.clear();
        self.bullets.clear();
        // The spawner runs on sim time, which restarts at zero
        self.spawner.reset(0.0);
        self.timers.clear();
        self.scoring.reset();
        self.vfx.clear();
        self.tick_count = 0;
        self.events.clear();
        self.round_started_at = now;
        self.paused_total_ms = 0.0;
        self.pause_started_at = 0.0;
        self.last_shot_at = f64::NEG_INFINITY;
    }

    /// Active play time: wall clock minus everything spent paused
    pub fn active_ms(&self, now: f64) -> f64 {
        (now - self.round_started_at - self.paused_total_ms).max(0.0)
    }

    /// The simulation clock as seen by presentation code. Identical to
    /// `active_ms` while running, but frozen at the pause point during
    /// `Paused`/`Countdown` so effect ages don't drift under the overlay.
    pub fn sim_time(&self, now: f64) -> f64 {
        match self.phase {
            GamePhase::Paused | GamePhase::Countdown { .. } => {
                (self.pause_started_at - self.round_started_at - self.paused_total_ms).max(0.0)
            }
            _ => self.active_ms(now),
        }
    }

    pub fn pause(&mut self, now: f64) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            self.pause_started_at = now;
        }
    }

    /// Leave `Paused` for the resume countdown; the simulation stays
    /// halted until the countdown reaches zero.
    pub fn begin_resume(&mut self, now: f64) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Countdown {
                remaining: RESUME_COUNTDOWN_STEPS,
                next_step_at: now + RESUME_COUNTDOWN_STEP_MS,
            };
        }
    }

    /// Step the resume countdown; on zero, fold the paused span into the
    /// pause-compensation total and return to `Running`.
    pub fn advance_countdown(&mut self, now: f64) {
        if let GamePhase::Countdown {
            remaining,
            next_step_at,
        } = self.phase
        {
            if now >= next_step_at {
                if remaining <= 1 {
                    self.paused_total_ms += now - self.pause_started_at;
                    self.phase = GamePhase::Running;
                } else {
                    self.phase = GamePhase::Countdown {
                        remaining: remaining - 1,
                        next_step_at: next_step_at + RESUME_COUNTDOWN_STEP_MS,
                    };
                }
            }
        }
    }

    /// Lives hit zero: stop simulating and play the crash sequence out
    /// over a fixed delay before the round is finalized.
    pub fn enter_game_over(&mut self, now: f64) {
        self.phase = GamePhase::GameOverAnimating {
            until: now + GAME_OVER_ANIM_MS,
        };
        self.vfx.schedule_finale(self.player.rect().center(), now);
    }

    pub fn finalize_round(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::RoundOver {
            final_score: self.scoring.score,
        });
    }

    /// Quit to menu from any running/paused state
    pub fn quit_to_menu(&mut self) {
        self.phase = GamePhase::NotStarted;
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_timer_activation_and_expiry() {
        let mut timers = EffectTimers::default();
        assert!(!timers.is_active(TimedEffect::Weapon, 0.0));

        timers.activate(TimedEffect::Weapon, 1000.0);
        assert!(timers.is_active(TimedEffect::Weapon, 1000.0));
        assert!(timers.is_active(TimedEffect::Weapon, 5999.0));
        assert!(!timers.is_active(TimedEffect::Weapon, 6000.0));
    }

    #[test]
    fn reactivation_overwrites_instead_of_stacking() {
        // Speed boost lasts 5s; two pickups 1s apart must expire 5s after
        // the SECOND pickup, not 10s after the first.
        let mut timers = EffectTimers::default();
        timers.activate(TimedEffect::SpeedBoost, 0.0);
        timers.activate(TimedEffect::SpeedBoost, 1000.0);

        assert!(timers.is_active(TimedEffect::SpeedBoost, 5500.0));
        assert!(!timers.is_active(TimedEffect::SpeedBoost, 6500.0));
    }

    #[test]
    fn timers_are_independent_slots() {
        let mut timers = EffectTimers::default();
        timers.activate(TimedEffect::Invulnerability, 0.0);
        assert!(timers.is_active(TimedEffect::Invulnerability, 1000.0));
        assert!(!timers.is_active(TimedEffect::DoubleScore, 1000.0));
        assert!(!timers.is_active(TimedEffect::SpeedBoost, 1000.0));
    }

    #[test]
    fn countdown_resumes_after_three_steps() {
        let mut state = GameState::new(7);
        state.start_round(0.0);
        state.pause(10_000.0);
        assert_eq!(state.phase, GamePhase::Paused);

        state.begin_resume(60_000.0);
        assert!(matches!(state.phase, GamePhase::Countdown { remaining: 3, .. }));

        state.advance_countdown(61_000.0);
        assert!(matches!(state.phase, GamePhase::Countdown { remaining: 2, .. }));
        state.advance_countdown(62_000.0);
        assert!(matches!(state.phase, GamePhase::Countdown { remaining: 1, .. }));
        state.advance_countdown(63_000.0);
        assert_eq!(state.phase, GamePhase::Running);

        // Everything from the pause command to countdown zero is excluded
        // from active time.
        assert_eq!(state.paused_total_ms, 53_000.0);
        assert_eq!(state.active_ms(63_000.0), 10_000.0);
    }

    #[test]
    fn round_reset_clears_pools_and_counters() {
        let mut state = GameState::new(42);
        state.start_round(0.0);
        state.scoring.grant(100, false);
        state.lives = 1;
        state.obstacles.push(Obstacle {
            pos: Vec2::new(0.0, 0.0),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: 3.0,
            kind: ObstacleKind::Red,
        });

        state.start_round(5000.0);
        assert_eq!(state.scoring.score, 0);
        assert_eq!(state.lives, MAX_LIVES);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.active_ms(5000.0), 0.0);
    }
}
