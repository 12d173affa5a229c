//! Frame clock
//!
//! Turns animation-frame timestamps into frame deltas and drives [`tick`].

use super::input::InputSnapshot;
use super::state::{GameState, SignalSink};
use super::tick::tick;
use crate::tuning::Tuning;

/// Computes frame deltas from host timestamps
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    last_timestamp_ms: Option<f64>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp so the next frame starts from zero
    /// (page hidden, tab switched)
    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }

    /// Delta since the previous frame in milliseconds.
    ///
    /// The first frame, and any frame whose timestamp runs backwards, is 0.
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        if !timestamp_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp {}", timestamp_ms);
            return 0.0;
        }

        let dt = match self.last_timestamp_ms {
            Some(last) if timestamp_ms > last => (timestamp_ms - last) as f32,
            _ => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        dt
    }

    /// Run one frame: compute the delta and update every tap with `input`.
    ///
    /// Returns the delta that was applied.
    pub fn advance(
        &mut self,
        timestamp_ms: f64,
        input: &InputSnapshot,
        state: &mut GameState,
        tuning: &Tuning,
        sink: &mut dyn SignalSink,
    ) -> f32 {
        let dt = self.delta(timestamp_ms);
        tick(state, input, dt, tuning, sink);
        dt
    }
}
