//! Law on Tap - hold the tap, stop inside the perfect band, don't spill
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tap state machine, input routing, frame clock)
//! - `tuning`: Data-driven game balance (pour rate, perfect band, spill penalty)
//! - `renderer`: Render strategies (DOM class toggling, canvas 2D)
//! - `audio`: Procedural Web Audio signal sink (wasm only)
//! - `settings`: Persisted player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{RenderBackend, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

use sim::{BeerType, Rect, Tap};

/// Game configuration constants
pub mod consts {
    /// Logical coordinate space (tap bounds and pointer positions live here)
    pub const LOGICAL_WIDTH: f32 = 960.0;
    pub const LOGICAL_HEIGHT: f32 = 540.0;

    /// Default tap geometry
    pub const TAP_WIDTH: f32 = 100.0;
    pub const TAP_HEIGHT: f32 = 250.0;
    pub const TAP_TOP: f32 = 180.0;
    /// Left edge of the first tap
    pub const TAP_FIRST_X: f32 = 250.0;
    /// Horizontal distance between tap left edges
    pub const TAP_SPACING: f32 = 180.0;
}

/// Logical size as a vector
#[inline]
pub fn logical_size() -> Vec2 {
    Vec2::new(consts::LOGICAL_WIDTH, consts::LOGICAL_HEIGHT)
}

/// One entry of a tap layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapPlacement {
    pub bounds: Rect,
    pub beer_type: BeerType,
}

/// Fixed set of taps built at startup
#[derive(Debug, Clone, PartialEq)]
pub struct TapLayout {
    pub taps: Vec<TapPlacement>,
}

impl Default for TapLayout {
    /// Stout, IPA and Lager side by side, centered in the logical frame
    fn default() -> Self {
        use consts::*;

        let taps = [BeerType::Stout, BeerType::Ipa, BeerType::Lager]
            .into_iter()
            .enumerate()
            .map(|(i, beer_type)| TapPlacement {
                bounds: Rect::new(
                    TAP_FIRST_X + i as f32 * TAP_SPACING,
                    TAP_TOP,
                    TAP_WIDTH,
                    TAP_HEIGHT,
                ),
                beer_type,
            })
            .collect();

        Self { taps }
    }
}

impl TapLayout {
    /// Build the taps; ids follow layout order starting at 0
    pub fn build(&self) -> Vec<Tap> {
        self.taps
            .iter()
            .enumerate()
            .map(|(i, placement)| Tap::new(i as u32, placement.bounds, placement.beer_type))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_fits_logical_frame() {
        let layout = TapLayout::default();
        assert_eq!(layout.taps.len(), 3);
        for placement in &layout.taps {
            assert!(placement.bounds.right() <= consts::LOGICAL_WIDTH);
            assert!(placement.bounds.bottom() <= consts::LOGICAL_HEIGHT);
        }
        // The first tap matches the reference geometry
        assert_eq!(layout.taps[0].bounds, Rect::new(250.0, 180.0, 100.0, 250.0));
    }

    #[test]
    fn test_layout_build_assigns_ids_in_order() {
        let taps = TapLayout::default().build();
        let ids: Vec<u32> = taps.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(taps[1].beer_type, BeerType::Ipa);
    }
}
