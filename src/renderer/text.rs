//! Plain-text renderer
//!
//! Produces one line per tap. Used by the native build to log the bar state.

use super::TapRenderer;
use super::celebrate::Celebrations;
use crate::sim::{GameEvent, TapSnapshot};

/// Width of the fill gauge in characters
const GAUGE_WIDTH: usize = 20;

#[derive(Debug, Default)]
pub struct TextRenderer {
    lines: Vec<String>,
    celebrations: Celebrations,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines of the last drawn frame
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn gauge(fill_level: f32) -> String {
        let filled = ((fill_level / 100.0) * GAUGE_WIDTH as f32).round() as usize;
        let filled = filled.min(GAUGE_WIDTH);
        format!("{}{}", "#".repeat(filled), ".".repeat(GAUGE_WIDTH - filled))
    }
}

impl TapRenderer for TextRenderer {
    fn begin_frame(&mut self, dt_ms: f32) {
        self.lines.clear();
        self.celebrations.advance(dt_ms);
    }

    fn render(&mut self, tap: &TapSnapshot) {
        let status = if tap.locked {
            "SPILLED"
        } else if tap.pouring {
            "pouring"
        } else if self.celebrations.is_active(tap.id) {
            "PERFECT"
        } else {
            "idle"
        };
        self.lines.push(format!(
            "[{}] {:<5} [{}] {:>5.1}% {}",
            tap.id,
            tap.beer_type.as_str(),
            Self::gauge(tap.fill_level),
            tap.fill_level,
            status
        ));
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.celebrations.observe(event);
    }
}
