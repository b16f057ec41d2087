//! Game loop driver
//!
//! Owns the round state and wires it to the collaborators: input is
//! sampled at the top of every frame, the tick runs, gameplay events are
//! drained into audio cues, the frame is rendered, and a small snapshot
//! is published for the presentation layer to read between ticks.
//!
//! The embedder owns the actual frame callback (requestAnimationFrame,
//! a winit event loop, a test loop): it calls `frame` once per display
//! frame while `wants_frame` is true. Transitions that halt the loop
//! (pause, game over, quit) flip `wants_frame` off, which is how the
//! pending-schedule cancellation invariant is kept without this layer
//! touching any OS timer.
//!
//! Audio and best-score persistence are best-effort: failures are logged
//! and swallowed so they can never stall the next tick.

use crate::audio::{AudioError, AudioSink, SoundEffect};
use crate::highscores::BestScoreStore;
use crate::input::InputState;
use crate::render::{self, Surface};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Read-only view published after each tick
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub combo: u32,
    pub streak: u32,
    pub best_score: u64,
}

pub struct GameApp<A: AudioSink, S: BestScoreStore> {
    state: GameState,
    input: InputState,
    settings: Settings,
    audio: A,
    store: S,
    best_score: u64,
    snapshot: Snapshot,
}

impl<A: AudioSink, S: BestScoreStore> GameApp<A, S> {
    pub fn new(seed: u64, settings: Settings, audio: A, store: S) -> Self {
        let best_score = store.load();
        let state = GameState::new(seed);
        let snapshot = Snapshot {
            phase: state.phase,
            score: 0,
            lives: state.lives,
            combo: 0,
            streak: 0,
            best_score,
        };
        Self {
            state,
            input: InputState::new(),
            settings,
            audio,
            store,
            best_score,
            snapshot,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for debug tooling and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// The shell feeds key/touch events through this
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Whether the embedder should keep scheduling frame callbacks
    pub fn wants_frame(&self) -> bool {
        !matches!(
            self.state.phase,
            GamePhase::NotStarted | GamePhase::Paused | GamePhase::GameOver
        )
    }

    /// Start or restart a round
    pub fn start(&mut self, now: f64) {
        self.best_score = self.store.load();
        self.state.start_round(now);
        self.input.clear();
        if self.settings.music {
            log_ignored(self.audio.start_music(), "start music");
        }
        self.publish();
    }

    pub fn pause(&mut self, now: f64) {
        self.state.pause(now);
        log_ignored(self.audio.pause_music(), "pause music");
        self.publish();
    }

    /// Begin the resume countdown; music comes back when it hits zero
    pub fn resume(&mut self, now: f64) {
        self.state.begin_resume(now);
        self.publish();
    }

    pub fn quit_to_menu(&mut self) {
        self.state.quit_to_menu();
        self.input.clear();
        log_ignored(self.audio.stop_music(), "stop music");
        self.publish();
    }

    /// Run one frame: sample input, tick, drain events, render, publish.
    ///
    /// A missing display surface skips the whole frame - no simulation
    /// step is worth computing when nothing can be shown - and the next
    /// scheduled callback simply tries again.
    pub fn frame(&mut self, now: f64, surface: Option<&mut dyn Surface>) {
        let Some(surface) = surface else {
            log::debug!("display surface unavailable, skipping frame");
            return;
        };

        let phase_before = self.state.phase;
        let input = self.input.sample();
        tick(&mut self.state, &input, now);

        // Audio follows phase transitions the tick performed
        match (phase_before, self.state.phase) {
            (GamePhase::Running, GamePhase::Paused) => {
                log_ignored(self.audio.pause_music(), "pause music");
            }
            (GamePhase::Countdown { .. }, GamePhase::Running) => {
                if self.settings.music {
                    log_ignored(self.audio.resume_music(), "resume music");
                }
            }
            _ => {}
        }

        for event in self.state.take_events() {
            self.handle_event(event);
        }

        if !self.settings.effective_screen_shake() {
            self.state.vfx.shake = 0.0;
        }

        render::render(&self.state, surface, now);
        self.publish();
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::ShotFired => self.effect(SoundEffect::Shoot),
            GameEvent::PowerupCollected(_) | GameEvent::CoinCollected(_) => {
                self.effect(SoundEffect::Pickup)
            }
            GameEvent::ObstacleDestroyed | GameEvent::DamageTaken => {
                self.effect(SoundEffect::Explosion)
            }
            GameEvent::RoundOver { final_score } => {
                log_ignored(self.audio.stop_music(), "stop music");
                self.effect(SoundEffect::GameOver);
                if final_score > self.best_score {
                    self.best_score = final_score;
                    // Fire-and-forget: a failed save never stops the game
                    if let Err(err) = self.store.save(final_score) {
                        log::warn!("best score save failed: {err}");
                    }
                }
            }
        }
    }

    fn effect(&mut self, effect: SoundEffect) {
        if self.settings.sound_effects {
            log_ignored(self.audio.play_effect(effect), "sound effect");
        }
    }

    fn publish(&mut self) {
        self.snapshot = Snapshot {
            phase: self.state.phase,
            score: self.state.scoring.score,
            lives: self.state.lives,
            combo: self.state.scoring.combo,
            streak: self.state.scoring.streak,
            best_score: self.best_score,
        };
    }
}

/// Transient audio failures are logged and dropped, never propagated
fn log_ignored(result: Result<(), AudioError>, what: &str) {
    if let Err(err) = result {
        log::warn!("{what} failed (ignored): {err}");
    }
}
