//! Short cosmetic highlight after a perfect pour
//!
//! The simulation resets a tap the moment it's released. Renderers keep
//! the "perfect" look up a little longer with these countdowns.

use std::collections::BTreeMap;

use crate::sim::GameEvent;

/// How long a perfect pour stays highlighted
pub const PERFECT_CELEBRATION_MS: f32 = 1000.0;

/// Per-tap highlight countdowns
#[derive(Debug, Clone, Default)]
pub struct Celebrations {
    remaining_ms: BTreeMap<u32, f32>,
}

impl Celebrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or restart the highlight for a tap
    pub fn trigger(&mut self, tap_id: u32) {
        self.remaining_ms.insert(tap_id, PERFECT_CELEBRATION_MS);
    }

    /// Start a highlight for perfect pours, clear it when a new pour begins
    pub fn observe(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Perfect { tap_id, .. } => self.trigger(tap_id),
            GameEvent::PourStarted { tap_id } => {
                self.remaining_ms.remove(&tap_id);
            }
            _ => {}
        }
    }

    pub fn advance(&mut self, dt_ms: f32) {
        let dt_ms = crate::sim::sanitize_dt(dt_ms);
        for remaining in self.remaining_ms.values_mut() {
            *remaining -= dt_ms;
        }
        self.remaining_ms.retain(|_, remaining| *remaining > 0.0);
    }

    pub fn is_active(&self, tap_id: u32) -> bool {
        self.remaining_ms.contains_key(&tap_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_highlight_expires() {
        let mut celebrations = Celebrations::new();
        celebrations.observe(&GameEvent::Perfect {
            tap_id: 1,
            fill_level: 90.0,
        });
        assert!(celebrations.is_active(1));
        assert!(!celebrations.is_active(0));

        celebrations.advance(600.0);
        assert!(celebrations.is_active(1));
        celebrations.advance(400.0);
        assert!(!celebrations.is_active(1));
    }

    #[test]
    fn test_new_pour_cancels_highlight() {
        let mut celebrations = Celebrations::new();
        celebrations.trigger(2);
        celebrations.observe(&GameEvent::PourStarted { tap_id: 2 });
        assert!(!celebrations.is_active(2));
    }

    #[test]
    fn test_other_events_are_ignored() {
        let mut celebrations = Celebrations::new();
        celebrations.observe(&GameEvent::BadPour {
            tap_id: 0,
            fill_level: 50.0,
        });
        celebrations.observe(&GameEvent::Spill { tap_id: 0 });
        assert!(!celebrations.is_active(0));
    }
}
