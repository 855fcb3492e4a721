//! Audio preferences
//!
//! Persisted separately from the player profile in LocalStorage. Playback
//! itself belongs to the host; the core only stores the knobs and computes
//! effective volumes.

use serde::{Deserialize, Serialize};

/// Audio preference document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute music entirely
    pub mute_music: bool,
    /// Mute sound effects entirely
    pub mute_sfx: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 1.0,
            mute_music: false,
            mute_sfx: false,
        }
    }
}

impl AudioSettings {
    /// Clamp all volumes into [0, 1]; applied after deserializing and after
    /// host-side slider writes
    pub fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Effective music volume (mute-aware)
    pub fn effective_music_volume(&self) -> f32 {
        if self.mute_music {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Effective sound-effect volume (mute-aware)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.mute_sfx {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "baalance_audio";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<AudioSettings>(&json) {
                    log::info!("Loaded audio settings from LocalStorage");
                    return settings.clamped();
                }
            }
        }

        log::info!("Using default audio settings");
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
                log::info!("Audio settings saved");
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
