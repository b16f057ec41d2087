//! Transient visual effects
//!
//! Explosions, particles, score popups, screen shake and the queue of
//! bursts scheduled for a later tick (bullet-kill follow-ups, the
//! game-over finale). Everything here is presentation-side output of
//! gameplay events: collision and scoring never read this state.
//!
//! Particle spread uses the same deterministic integer-hash trick as the
//! rest of the sim so replays stay bit-identical without touching the
//! spawner's RNG stream.

use glam::Vec2;

/// Particle pool cap; oldest entries make room
pub const MAX_PARTICLES: usize = 256;
pub const EXPLOSION_DURATION_MS: f64 = 500.0;
pub const POPUP_DURATION_MS: f64 = 800.0;

/// Expanding fireball drawn at a kill or crash site
#[derive(Debug, Clone, Copy)]
pub struct Explosion {
    pub pos: Vec2,
    pub spawned_at: f64,
}

impl Explosion {
    /// 0.0 fresh, 1.0 expired
    pub fn age_frac(&self, now: f64) -> f32 {
        (((now - self.spawned_at) / EXPLOSION_DURATION_MS).clamp(0.0, 1.0)) as f32
    }
}

/// Visual class of a particle, drives its color at draw time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleTint {
    Fire,
    Spark,
    Sparkle,
}

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: f32,
    pub tint: ParticleTint,
    pub spawned_at: f64,
    pub lifetime_ms: f64,
}

impl Particle {
    /// Remaining life in [0, 1], for alpha fade
    pub fn life_frac(&self, now: f64) -> f32 {
        (1.0 - (now - self.spawned_at) / self.lifetime_ms).clamp(0.0, 1.0) as f32
    }
}

/// Floating "+N" label spawned wherever points were earned
#[derive(Debug, Clone)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub amount: u64,
    pub spawned_at: f64,
}

impl ScorePopup {
    pub fn age_frac(&self, now: f64) -> f32 {
        (((now - self.spawned_at) / POPUP_DURATION_MS).clamp(0.0, 1.0)) as f32
    }
}

/// A burst queued for a future tick
#[derive(Debug, Clone, Copy)]
struct ScheduledBurst {
    at: f64,
    pos: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct Vfx {
    pub explosions: Vec<Explosion>,
    pub particles: Vec<Particle>,
    pub popups: Vec<ScorePopup>,
    scheduled: Vec<ScheduledBurst>,
    /// Screen shake magnitude in [0, 1], decays every tick
    pub shake: f32,
    burst_seed: u32,
}

fn hash(seed: u32, i: u32) -> u32 {
    seed.wrapping_mul(2654435761).wrapping_add(i.wrapping_mul(7919))
}

fn unit(h: u32) -> f32 {
    (h % 1000) as f32 / 1000.0
}

impl Vfx {
    pub fn clear(&mut self) {
        self.explosions.clear();
        self.particles.clear();
        self.popups.clear();
        self.scheduled.clear();
        self.shake = 0.0;
        self.burst_seed = 0;
    }

    pub fn add_shake(&mut self, amount: f32) {
        self.shake = (self.shake + amount).min(1.0);
    }

    fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Explosion plus a ring of debris particles at `center`
    pub fn explosion_burst(&mut self, center: Vec2, now: f64) {
        self.explosions.push(Explosion {
            pos: center,
            spawned_at: now,
        });

        self.burst_seed = self.burst_seed.wrapping_add(1);
        let seed = self.burst_seed;
        for i in 0..18u32 {
            let h = hash(seed, i);
            let angle = unit(h) * std::f32::consts::TAU;
            let speed = 2.0 + unit(h >> 10) * 4.0;
            let tint = if h.is_multiple_of(3) {
                ParticleTint::Spark
            } else {
                ParticleTint::Fire
            };
            self.push_particle(Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                size: 2.0 + unit(h >> 20) * 4.0,
                tint,
                spawned_at: now,
                lifetime_ms: 400.0 + unit(h >> 10) as f64 * 500.0,
            });
        }
        self.add_shake(0.35);
    }

    /// Soft sparkle used for powerup and coin pickups
    pub fn pickup_sparkle(&mut self, center: Vec2, now: f64) {
        self.burst_seed = self.burst_seed.wrapping_add(1);
        let seed = self.burst_seed;
        for i in 0..8u32 {
            let h = hash(seed, i);
            let angle = unit(h) * std::f32::consts::TAU;
            let speed = 1.0 + unit(h >> 10) * 2.0;
            self.push_particle(Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                size: 1.5 + unit(h >> 20) * 2.0,
                tint: ParticleTint::Sparkle,
                spawned_at: now,
                lifetime_ms: 350.0 + unit(h >> 10) as f64 * 250.0,
            });
        }
    }

    pub fn score_popup(&mut self, pos: Vec2, amount: u64, now: f64) {
        self.popups.push(ScorePopup {
            pos,
            amount,
            spawned_at: now,
        });
    }

    /// Queue a burst to fire at a later tick
    pub fn schedule_burst(&mut self, pos: Vec2, at: f64) {
        self.scheduled.push(ScheduledBurst { at, pos });
    }

    /// Pre-schedule the game-over crash sequence around the player's
    /// final position. Plays out while the simulation itself is halted.
    pub fn schedule_finale(&mut self, center: Vec2, now: f64) {
        self.add_shake(1.0);
        self.explosion_burst(center, now);
        for i in 1..=4u32 {
            let h = hash(self.burst_seed, i);
            let offset = Vec2::new(
                (unit(h) - 0.5) * 90.0,
                (unit(h >> 12) - 0.5) * 90.0,
            );
            self.schedule_burst(center + offset, now + i as f64 * 280.0);
        }
    }

    /// Fire due scheduled bursts, move particles, prune expired effects,
    /// decay shake. Runs every tick in which anything renders, including
    /// the game-over animation where gameplay is frozen.
    pub fn advance(&mut self, now: f64) {
        let mut i = 0;
        while i < self.scheduled.len() {
            if self.scheduled[i].at <= now {
                let burst = self.scheduled.remove(i);
                self.explosion_burst(burst.pos, now);
            } else {
                i += 1;
            }
        }

        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.vel *= 0.92;
        }
        self.particles
            .retain(|p| now - p.spawned_at < p.lifetime_ms);
        self.explosions
            .retain(|e| now - e.spawned_at < EXPLOSION_DURATION_MS);
        self.popups.retain(|p| now - p.spawned_at < POPUP_DURATION_MS);

        self.shake *= 0.9;
        if self.shake < 0.01 {
            self.shake = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explosion_expires_after_duration() {
        let mut vfx = Vfx::default();
        vfx.explosion_burst(Vec2::new(100.0, 100.0), 0.0);
        assert_eq!(vfx.explosions.len(), 1);
        assert!(!vfx.particles.is_empty());

        vfx.advance(EXPLOSION_DURATION_MS - 1.0);
        assert_eq!(vfx.explosions.len(), 1);
        vfx.advance(EXPLOSION_DURATION_MS + 1.0);
        assert!(vfx.explosions.is_empty());
    }

    #[test]
    fn scheduled_burst_fires_only_when_due() {
        let mut vfx = Vfx::default();
        vfx.schedule_burst(Vec2::new(50.0, 50.0), 1000.0);

        vfx.advance(500.0);
        assert!(vfx.explosions.is_empty());

        vfx.advance(1000.0);
        assert_eq!(vfx.explosions.len(), 1);
    }

    #[test]
    fn particle_pool_is_capped() {
        let mut vfx = Vfx::default();
        for i in 0..60 {
            vfx.explosion_burst(Vec2::new(i as f32, 0.0), 0.0);
        }
        assert!(vfx.particles.len() <= MAX_PARTICLES);
    }

    #[test]
    fn shake_decays_to_zero() {
        let mut vfx = Vfx::default();
        vfx.add_shake(1.0);
        for _ in 0..100 {
            vfx.advance(0.0);
        }
        assert_eq!(vfx.shake, 0.0);
    }

    #[test]
    fn finale_spawns_follow_up_bursts_over_time() {
        let mut vfx = Vfx::default();
        vfx.schedule_finale(Vec2::new(400.0, 540.0), 0.0);
        let initial = vfx.explosions.len();
        assert_eq!(initial, 1);

        vfx.advance(1500.0);
        assert!(vfx.explosions.len() > initial);
    }
}
