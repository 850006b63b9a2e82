//! Player preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Toggleable preference, for key bindings and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Haptics,
    Sound,
    AimGuide,
}

impl Toggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Toggle::Haptics => "Haptics",
            Toggle::Sound => "Sound",
            Toggle::AimGuide => "Aim guide",
        }
    }

    /// Keyboard shortcut for a toggle
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "h" | "H" => Some(Toggle::Haptics),
            "m" | "M" => Some(Toggle::Sound),
            "g" | "G" => Some(Toggle::AimGuide),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Vibrate on release and on scoring hits (where supported)
    pub haptics: bool,
    /// Procedural sound cues
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Dashed aim guide while aiming
    pub aim_guide: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            haptics: true,
            sound: true,
            master_volume: 0.8,
            aim_guide: true,
        }
    }
}

impl Settings {
    /// Flip a toggle and return its new value
    pub fn toggle(&mut self, which: Toggle) -> bool {
        let flag = match which {
            Toggle::Haptics => &mut self.haptics,
            Toggle::Sound => &mut self.sound,
            Toggle::AimGuide => &mut self.aim_guide,
        };
        *flag = !*flag;
        *flag
    }

    /// Effective volume for sound cues
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Parse stored JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "archery_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(json) = crate::platform::storage_get(Self::STORAGE_KEY) {
            log::info!("Loaded settings from LocalStorage");
            return Self::from_json(&json);
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if crate::platform::storage_set(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
