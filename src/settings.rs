//! Game settings and preferences
//!
//! Persisted as a small JSON file next to the best score. Corruption is
//! never fatal: defaults win and the player reconfigures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Background music during a round
    pub music: bool,
    /// One-shot sound effects
    pub sound_effects: bool,
    /// Screen shake on explosions/impacts
    pub screen_shake: bool,
    /// Minimize shake and flashes
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music: true,
            sound_effects: true,
            screen_shake: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("settings file unreadable, using defaults: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("failed to save settings: {err}");
                }
            }
            Err(err) => log::warn!("failed to encode settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json"));
        assert!(settings.music);
        assert!(settings.screen_shake);
    }

    #[test]
    fn reduced_motion_overrides_screen_shake() {
        let settings = Settings {
            screen_shake: true,
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = std::env::temp_dir().join("car_rush_settings_test.json");
        let _ = fs::remove_file(&path);

        let settings = Settings {
            music: false,
            ..Default::default()
        };
        settings.save(&path);
        let loaded = Settings::load(&path);
        assert!(!loaded.music);

        let _ = fs::remove_file(&path);
    }
}
