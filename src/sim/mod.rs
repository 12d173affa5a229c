//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the frame delta handed to `tick`
//! - Countdowns instead of timers
//! - Stable iteration order (by tap ID)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use clock::SimulationClock;
pub use input::{InputRouter, InputSnapshot, PointerEvent, SurfaceGeometry};
pub use rect::Rect;
pub use state::{
    BeerType, GameEvent, GameState, PourOutcome, PourTally, SignalSink, Tap, TapSnapshot,
    TapState,
};
pub use tick::{Transition, sanitize_dt, tick};
