//! Scoring engine
//!
//! Survival trickle, coin values, pickup bonuses and the bullet-kill
//! combo/streak. Every award funnels through one `grant` so the
//! double-score multiplier can never be applied inconsistently. Score
//! only ever goes up; damage costs combo and streak, never points.

use crate::consts::*;

use super::state::{CoinKind, PowerupKind};

#[derive(Debug, Clone, Default)]
pub struct Scoring {
    pub score: u64,
    /// Consecutive bullet kills inside the rolling combo window
    pub combo: u32,
    /// Kills since last damage taken; ignores the combo window
    pub streak: u32,
    last_kill_at: Option<f64>,
    credited_seconds: u64,
}

impl Scoring {
    pub fn reset(&mut self) {
        *self = Scoring::default();
    }

    /// Apply the global multiplier and add to the total. Returns the
    /// points actually granted, which is also what the popup shows.
    pub fn grant(&mut self, base: u64, doubled: bool) -> u64 {
        let points = if doubled { base * 2 } else { base };
        self.score += points;
        points
    }

    /// Survival trickle: a flat amount once per full second of active
    /// play. Catches up if a tick spans a second boundary.
    pub fn survival(&mut self, active_ms: f64, doubled: bool) -> u64 {
        let whole_seconds = (active_ms / 1000.0).floor() as u64;
        let mut granted = 0;
        while self.credited_seconds < whole_seconds {
            self.credited_seconds += 1;
            granted += self.grant(SURVIVAL_POINTS_PER_SEC, doubled);
        }
        granted
    }

    pub fn coin(&mut self, kind: CoinKind, doubled: bool) -> u64 {
        self.grant(kind.value(), doubled)
    }

    pub fn pickup(&mut self, kind: PowerupKind, doubled: bool) -> u64 {
        self.grant(kind.pickup_points(), doubled)
    }

    /// Score a bullet kill: base points, plus a combo bonus once the
    /// combo counter exceeds one. The combo lapses when kills are spaced
    /// wider than the window; the streak only resets on damage.
    pub fn bullet_kill(&mut self, now: f64, doubled: bool) -> u64 {
        if let Some(last) = self.last_kill_at {
            if now - last > COMBO_WINDOW_MS {
                self.combo = 0;
            }
        }
        self.combo += 1;
        self.streak += 1;
        self.last_kill_at = Some(now);

        let mut base = BULLET_KILL_POINTS;
        if self.combo > 1 {
            base += self.combo as u64 * COMBO_BONUS_PER_HIT;
        }
        self.grant(base, doubled)
    }

    /// Taking obstacle damage voids combo and streak; score is untouched
    pub fn on_damage(&mut self) {
        self.combo = 0;
        self.streak = 0;
        self.last_kill_at = None;
    }
}
