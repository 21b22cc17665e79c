//! Game settings and preferences
//!
//! Read from an optional JSON file; anything missing or unreadable falls
//! back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed; `None` picks one from the clock
    pub seed: Option<u64>,

    // === Audio ===
    /// Emit sound triggers at all
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Headless host ===
    /// Stop the simulation after this much game time
    pub max_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            sound_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            max_seconds: 120.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
