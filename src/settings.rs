//! Game settings and preferences
//!
//! Persisted as JSON in the key/value store, separately from the high score.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Selects which background the surface paints behind the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BackgroundKey {
    #[default]
    One,
    Two,
    Three,
}

impl BackgroundKey {
    /// Cycle to the next background
    pub fn next(&self) -> Self {
        match self {
            BackgroundKey::One => BackgroundKey::Two,
            BackgroundKey::Two => BackgroundKey::Three,
            BackgroundKey::Three => BackgroundKey::One,
        }
    }
}

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Relaxed,
    #[default]
    Normal,
    Frantic,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Relaxed => "Relaxed",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(DifficultyPreset::Relaxed),
            "normal" => Some(DifficultyPreset::Normal),
            "frantic" | "hard" => Some(DifficultyPreset::Frantic),
            _ => None,
        }
    }

    /// Multiplier on the per-call spawn chance
    pub fn spawn_multiplier(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => 0.7,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Frantic => 1.4,
        }
    }

    /// Multiplier on obstacle fall speed
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => 0.8,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Frantic => 1.25,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub background: BackgroundKey,
    pub difficulty: DifficultyPreset,
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "garbage_catch_settings";

    /// Load settings, falling back to defaults when absent or malformed
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }
}
