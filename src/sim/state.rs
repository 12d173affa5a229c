//! Game state and core simulation types
//!
//! Taps own all mutable gameplay state. Nothing outside `tick` writes to
//! a tap; renderers read [`TapSnapshot`]s.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Beer served by a tap (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeerType {
    Stout,
    Ipa,
    Lager,
}

impl BeerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BeerType::Stout => "Stout",
            BeerType::Ipa => "IPA",
            BeerType::Lager => "Lager",
        }
    }

    /// CSS color of the liquid
    pub fn liquid_color(&self) -> &'static str {
        match self {
            BeerType::Stout => "#3b2600",
            BeerType::Ipa => "#d48600",
            BeerType::Lager => "#ffd700",
        }
    }
}

/// Where a tap is in its pour cycle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TapState {
    /// Waiting for contact
    #[default]
    Idle,
    /// Player is holding the tap
    Pouring,
    /// Spill penalty, input ignored until the countdown runs out
    Locked { remaining_ms: f32 },
}

/// Result of releasing a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PourOutcome {
    /// Stopped inside the perfect band
    Perfect,
    /// Enough beer to matter, wrong amount
    BadPour,
    /// Barely poured anything
    Negligible,
}

/// Signals for audio/visual collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PourStarted { tap_id: u32 },
    PourStopped { tap_id: u32 },
    Perfect { tap_id: u32, fill_level: f32 },
    BadPour { tap_id: u32, fill_level: f32 },
    Spill { tap_id: u32 },
    /// Spill penalty over, tap usable again
    LockReleased { tap_id: u32 },
}

impl GameEvent {
    pub fn tap_id(&self) -> u32 {
        match *self {
            GameEvent::PourStarted { tap_id }
            | GameEvent::PourStopped { tap_id }
            | GameEvent::Perfect { tap_id, .. }
            | GameEvent::BadPour { tap_id, .. }
            | GameEvent::Spill { tap_id }
            | GameEvent::LockReleased { tap_id } => tap_id,
        }
    }
}

/// Receives signals synchronously as the simulation emits them
pub trait SignalSink {
    fn signal(&mut self, event: GameEvent);
}

/// Record every signal (tests, frame-local buffering)
impl SignalSink for Vec<GameEvent> {
    fn signal(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discard signals
impl SignalSink for () {
    fn signal(&mut self, _event: GameEvent) {}
}

/// A single pour station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tap {
    pub id: u32,
    pub bounds: Rect,
    pub beer_type: BeerType,
    pub(crate) fill_level: f32,
    pub(crate) state: TapState,
}

impl Tap {
    pub fn new(id: u32, bounds: Rect, beer_type: BeerType) -> Self {
        Self {
            id,
            bounds,
            beer_type,
            fill_level: 0.0,
            state: TapState::Idle,
        }
    }

    pub fn state(&self) -> TapState {
        self.state
    }

    /// Raw fill (may sit above 100 while spilled)
    pub fn fill_level(&self) -> f32 {
        self.fill_level
    }

    /// Fill clamped to [0, 100] for drawing
    pub fn display_fill(&self) -> f32 {
        self.fill_level.clamp(0.0, 100.0)
    }

    pub fn is_idle(&self) -> bool {
        self.state == TapState::Idle
    }

    pub fn is_pouring(&self) -> bool {
        self.state == TapState::Pouring
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, TapState::Locked { .. })
    }

    /// Cooldown left, only while locked
    pub fn lock_remaining_ms(&self) -> Option<f32> {
        match self.state {
            TapState::Locked { remaining_ms } => Some(remaining_ms),
            _ => None,
        }
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> TapSnapshot {
        TapSnapshot {
            id: self.id,
            bounds: self.bounds,
            beer_type: self.beer_type,
            fill_level: self.display_fill(),
            pouring: self.is_pouring(),
            locked: self.is_locked(),
        }
    }
}

/// What a renderer needs to draw one tap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapSnapshot {
    pub id: u32,
    pub bounds: Rect,
    pub beer_type: BeerType,
    /// Display fill in [0, 100]
    pub fill_level: f32,
    pub pouring: bool,
    pub locked: bool,
}

/// Session outcome counters (not persisted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PourTally {
    pub perfect: u32,
    pub bad: u32,
    pub spilled: u32,
    pub negligible: u32,
}

impl PourTally {
    pub fn record(&mut self, outcome: PourOutcome) {
        match outcome {
            PourOutcome::Perfect => self.perfect += 1,
            PourOutcome::BadPour => self.bad += 1,
            PourOutcome::Negligible => self.negligible += 1,
        }
    }

    /// Pours that ended in a real result (negligible taps don't count)
    pub fn attempts(&self) -> u32 {
        self.perfect + self.bad + self.spilled
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Taps, sorted by id for deterministic iteration
    pub taps: Vec<Tap>,
    pub tally: PourTally,
    /// Frames simulated so far
    pub frame_count: u64,
}

impl GameState {
    pub fn new(mut taps: Vec<Tap>) -> Self {
        taps.sort_by_key(|t| t.id);
        Self {
            taps,
            tally: PourTally::default(),
            frame_count: 0,
        }
    }

    /// Snapshots for every tap in id order
    pub fn snapshots(&self) -> impl Iterator<Item = TapSnapshot> + '_ {
        self.taps.iter().map(Tap::snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap() -> Tap {
        Tap::new(7, Rect::new(250.0, 180.0, 100.0, 250.0), BeerType::Stout)
    }

    #[test]
    fn test_new_tap_is_idle_and_empty() {
        let tap = tap();
        assert!(tap.is_idle());
        assert!(!tap.is_pouring());
        assert!(!tap.is_locked());
        assert_eq!(tap.fill_level(), 0.0);
        assert_eq!(tap.lock_remaining_ms(), None);
    }

    #[test]
    fn test_snapshot_clamps_fill() {
        let mut tap = tap();
        tap.fill_level = 101.5;
        tap.state = TapState::Locked {
            remaining_ms: 2000.0,
        };
        let snap = tap.snapshot();
        assert_eq!(snap.id, 7);
        assert_eq!(snap.fill_level, 100.0);
        assert!(snap.locked);
        assert!(!snap.pouring);
        assert_eq!(tap.lock_remaining_ms(), Some(2000.0));
    }

    #[test]
    fn test_game_state_sorts_taps() {
        let a = Tap::new(2, Rect::new(0.0, 0.0, 10.0, 10.0), BeerType::Lager);
        let b = Tap::new(0, Rect::new(20.0, 0.0, 10.0, 10.0), BeerType::Stout);
        let c = Tap::new(1, Rect::new(40.0, 0.0, 10.0, 10.0), BeerType::Ipa);
        let state = GameState::new(vec![a, b, c]);
        let ids: Vec<u32> = state.snapshots().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(state.taps[2].beer_type, BeerType::Lager);
    }

    #[test]
    fn test_tally() {
        let mut tally = PourTally::default();
        tally.record(PourOutcome::Perfect);
        tally.record(PourOutcome::BadPour);
        tally.record(PourOutcome::Negligible);
        tally.spilled += 1;
        assert_eq!(tally.attempts(), 3);
        assert_eq!(tally.negligible, 1);
    }

    #[test]
    fn test_event_tap_id() {
        let events = [
            GameEvent::PourStarted { tap_id: 1 },
            GameEvent::Perfect {
                tap_id: 1,
                fill_level: 85.0,
            },
            GameEvent::LockReleased { tap_id: 1 },
        ];
        assert!(events.iter().all(|e| e.tap_id() == 1));
    }
}
