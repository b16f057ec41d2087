//! Audio collaborator boundary
//!
//! The game drives a background music loop plus a handful of one-shot
//! effects through `AudioSink`. Playback is best-effort everywhere: a
//! sink error is logged by the caller and swallowed, never propagated
//! into the tick loop.

use thiserror::Error;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet leaves the muzzle
    Shoot,
    /// Powerup or coin collected
    Pickup,
    /// Obstacle destroyed or player hit
    Explosion,
    /// Round finalized
    GameOver,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio backend unavailable")]
    Unavailable,
    #[error("playback rejected: {0}")]
    Playback(String),
}

/// Narrow audio contract the app layer talks to.
///
/// Implementations live with the platform shell; the simulation itself
/// never touches audio.
pub trait AudioSink {
    /// Start the looping background track from the beginning
    fn start_music(&mut self) -> Result<(), AudioError>;
    fn pause_music(&mut self) -> Result<(), AudioError>;
    fn resume_music(&mut self) -> Result<(), AudioError>;
    fn stop_music(&mut self) -> Result<(), AudioError>;
    fn play_effect(&mut self, effect: SoundEffect) -> Result<(), AudioError>;
}

/// Sink that plays nothing; headless runs and tests
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn start_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
    fn pause_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
    fn resume_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
    fn stop_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
    fn play_effect(&mut self, _effect: SoundEffect) -> Result<(), AudioError> {
        Ok(())
    }
}
