//! Volume settings and preferences
//!
//! Loaded from a JSON file named by `STORM_ROAD_SETTINGS` when present;
//! otherwise defaults apply.

use serde::{Deserialize, Serialize};

/// Audio preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute all audio
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Effective mixer master volume
    pub fn effective_master(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    /// Load from the file named by `STORM_ROAD_SETTINGS`, defaults otherwise
    pub fn load() -> Self {
        let Ok(path) = std::env::var("STORM_ROAD_SETTINGS") else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {path}");
                    settings
                }
                Err(e) => {
                    log::warn!("Malformed settings in {path}: {e}; using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {path}: {e}; using defaults");
                Self::default()
            }
        }
    }
}
