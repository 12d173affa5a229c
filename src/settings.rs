//! Player settings and preferences
//!
//! Persisted separately from tuning in LocalStorage.

use serde::{Deserialize, Serialize};

/// Which presentation backend draws the taps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderBackend {
    /// Draw on the `#canvas` element
    #[default]
    Canvas,
    /// Toggle CSS classes on `#tap-N` elements
    Dom,
}

impl RenderBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderBackend::Canvas => "Canvas",
            RenderBackend::Dom => "DOM",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Presentation backend
    pub render_backend: RenderBackend,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all sound
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show the perfect/bad/spill tally
    pub show_tally: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render_backend: RenderBackend::Canvas,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,

            // HUD
            show_tally: true,
        }
    }
}

impl Settings {
    /// Flip the mute preference, returning the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "law_on_tap_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(RenderBackend::Dom.as_str(), "DOM");
        assert_eq!(RenderBackend::default(), RenderBackend::Canvas);
    }

    #[test]
    fn test_toggle_mute() {
        let mut settings = Settings::default();
        assert!(settings.toggle_mute());
        assert!(settings.muted);
        assert!(!settings.toggle_mute());
        assert!(!settings.muted);
    }

    #[test]
    fn test_muted_round_trips_through_storage_json() {
        let mut settings = Settings::default();
        settings.toggle_mute();
        let json = serde_json::to_string(&settings).expect("serializable");
        let restored: Settings = serde_json::from_str(&json).expect("valid settings");
        assert!(restored.muted);
        assert_eq!(restored.render_backend, settings.render_backend);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "render_backend": "Dom" }"#)
            .expect("valid settings");
        assert_eq!(settings.render_backend, RenderBackend::Dom);
        assert!(settings.mute_on_blur);
        assert_eq!(settings.sfx_volume, 1.0);
    }
}
