//! Rendering module
//!
//! Presentation is a strategy behind [`TapRenderer`]: the simulation hands out
//! read-only [`TapSnapshot`]s and each backend draws them its own way.
//! - `dom`: toggles CSS classes on pre-built tap elements (wasm only)
//! - `canvas`: draws taps on a 2D canvas (wasm only)
//! - `text`: one line per tap, for logs and the native build

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod celebrate;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod offsets;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use celebrate::Celebrations;
#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
pub use offsets::{OffsetTable, SpriteOffsets};
pub use text::TextRenderer;

use crate::sim::{GameEvent, GameState, TapSnapshot};

/// A presentation backend
pub trait TapRenderer {
    /// Called once per frame before any tap is drawn
    fn begin_frame(&mut self, _dt_ms: f32) {}

    /// Draw one tap
    fn render(&mut self, tap: &TapSnapshot);

    /// Called once per frame after every tap is drawn
    fn end_frame(&mut self) {}

    /// Signals emitted during the frame (for cosmetic effects)
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Draw every tap in id order
pub fn render_frame(state: &GameState, dt_ms: f32, renderer: &mut dyn TapRenderer) {
    renderer.begin_frame(dt_ms);
    for snapshot in state.snapshots() {
        renderer.render(&snapshot);
    }
    renderer.end_frame();
}
