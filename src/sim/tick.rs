//! Per-frame tap update
//!
//! Advances every tap by a variable frame delta. Fill accumulation is
//! scaled by elapsed milliseconds so the pour speed doesn't depend on the
//! display refresh rate.

use super::input::InputSnapshot;
use super::state::{GameEvent, GameState, PourOutcome, SignalSink, Tap, TapState};
use crate::tuning::Tuning;

/// State change produced by one tap update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Idle -> Pouring
    Started,
    /// Pouring -> Idle, with the classified result
    Released(PourOutcome),
    /// Pouring -> Locked
    Spilled,
    /// Locked -> Idle
    Unlocked,
}

/// Clamp a frame delta to a usable value (negative or non-finite -> 0)
pub fn sanitize_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() && dt_ms > 0.0 {
        dt_ms
    } else {
        if dt_ms != 0.0 {
            log::trace!("Clamping invalid frame delta {} to 0", dt_ms);
        }
        0.0
    }
}

impl Tap {
    /// Advance this tap by one frame.
    ///
    /// At most one state transition happens per call, except that a pour
    /// may start and spill within the same frame.
    pub fn update(
        &mut self,
        dt_ms: f32,
        input: &InputSnapshot,
        tuning: &Tuning,
        sink: &mut dyn SignalSink,
    ) -> Option<Transition> {
        let dt_ms = sanitize_dt(dt_ms);

        match self.state {
            TapState::Idle => {
                if !self.in_contact(input) {
                    return None;
                }
                self.state = TapState::Pouring;
                log::debug!("Tap {} pour started", self.id);
                sink.signal(GameEvent::PourStarted { tap_id: self.id });
                self.pour(dt_ms, tuning, sink).or(Some(Transition::Started))
            }
            TapState::Pouring => {
                if !self.in_contact(input) {
                    return Some(self.release(tuning, sink));
                }
                self.pour(dt_ms, tuning, sink)
            }
            TapState::Locked { remaining_ms } => {
                // Input is ignored for the whole cooldown
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms <= 0.0 {
                    self.fill_level = 0.0;
                    self.state = TapState::Idle;
                    log::debug!("Tap {} unlocked", self.id);
                    sink.signal(GameEvent::LockReleased { tap_id: self.id });
                    Some(Transition::Unlocked)
                } else {
                    self.state = TapState::Locked { remaining_ms };
                    None
                }
            }
        }
    }

    /// Pointer pressed strictly inside this tap's hitbox
    fn in_contact(&self, input: &InputSnapshot) -> bool {
        input.is_down && self.bounds.contains_strict(input.pos)
    }

    fn pour(&mut self, dt_ms: f32, tuning: &Tuning, sink: &mut dyn SignalSink) -> Option<Transition> {
        self.fill_level += tuning.pour_rate * (dt_ms / 1000.0);

        if self.fill_level >= tuning.overflow_threshold {
            self.state = TapState::Locked {
                remaining_ms: tuning.spill_penalty_ms,
            };
            log::info!(
                "SPILL! Tap {} ({}) locked for {} ms",
                self.id,
                self.beer_type.as_str(),
                tuning.spill_penalty_ms
            );
            sink.signal(GameEvent::Spill { tap_id: self.id });
            return Some(Transition::Spilled);
        }
        None
    }

    fn release(&mut self, tuning: &Tuning, sink: &mut dyn SignalSink) -> Transition {
        let fill_level = self.fill_level;
        sink.signal(GameEvent::PourStopped { tap_id: self.id });

        let outcome = tuning.classify(fill_level);
        match outcome {
            PourOutcome::Perfect => {
                log::info!("PERFECT! Tap {} at {:.1}%", self.id, fill_level);
                sink.signal(GameEvent::Perfect {
                    tap_id: self.id,
                    fill_level,
                });
            }
            PourOutcome::BadPour => {
                log::info!("Bad pour - dumped. Tap {} at {:.1}%", self.id, fill_level);
                sink.signal(GameEvent::BadPour {
                    tap_id: self.id,
                    fill_level,
                });
            }
            PourOutcome::Negligible => {
                log::debug!("Tap {} released at {:.1}%, nothing to judge", self.id, fill_level);
            }
        }

        self.fill_level = 0.0;
        self.state = TapState::Idle;
        Transition::Released(outcome)
    }
}

/// Advance every tap by one frame, in ascending id order.
///
/// All taps see the same input snapshot.
pub fn tick(
    state: &mut GameState,
    input: &InputSnapshot,
    dt_ms: f32,
    tuning: &Tuning,
    sink: &mut dyn SignalSink,
) {
    state.frame_count += 1;

    for tap in state.taps.iter_mut() {
        match tap.update(dt_ms, input, tuning, sink) {
            Some(Transition::Released(outcome)) => state.tally.record(outcome),
            Some(Transition::Spilled) => state.tally.spilled += 1,
            _ => {}
        }
    }
}
