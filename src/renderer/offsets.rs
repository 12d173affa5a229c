//! Cosmetic sprite nudges per tap
//!
//! Pixel offsets for the tower, handle and liquid of each tap so the art
//! lines up. Purely visual: the simulation never sees these.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Offsets in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteOffsets {
    pub tower: Vec2,
    pub handle: Vec2,
    pub liquid: Vec2,
}

/// Offsets keyed by tap id; unknown ids get no offset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OffsetTable {
    entries: BTreeMap<u32, SpriteOffsets>,
}

impl OffsetTable {
    pub fn get(&self, tap_id: u32) -> SpriteOffsets {
        self.entries.get(&tap_id).copied().unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Unreadable tables fall back to no offsets
    #[cfg(any(target_arch = "wasm32", test))]
    fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(table) => {
                log::info!("Loaded sprite offsets for {} taps", table.entries.len());
                table
            }
            Err(e) => {
                log::warn!("Ignoring unreadable sprite offsets: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "law_on_tap_offsets";

    /// Load the table from LocalStorage (WASM only, the canvas is the only consumer)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage.and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten()) {
            Some(json) => Self::from_json_or_default(&json),
            None => Self::default(),
        }
    }
}
