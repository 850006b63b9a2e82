//! Best score
//!
//! A single integer persisted to LocalStorage as plain decimal text.

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "archeryBestScore";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Parse the stored text; anything missing or malformed counts as 0
    pub fn parse(stored: Option<&str>) -> Self {
        let value = stored
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(0);
        Self { value }
    }

    /// Take `score` if it beats the current best. Returns true when it did.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = crate::platform::storage_get(Self::STORAGE_KEY);
        let best = Self::parse(stored.as_deref());
        log::info!("Loaded best score {}", best.value);
        best
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if crate::platform::storage_set(Self::STORAGE_KEY, &self.value.to_string()) {
            log::info!("Best score saved ({})", self.value);
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
