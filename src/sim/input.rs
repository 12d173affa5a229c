//! Pointer input routing
//!
//! Mouse and touch events from the host are folded into one logical pointer.
//! The host feeds [`PointerEvent`]s as they arrive; the frame loop copies an
//! [`InputSnapshot`] once per frame and hands the same value to every tap.
//!
//! Only one pointer exists. A second simultaneous touch shares the same
//! state (the host forwards the first touch of each event).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::logical_size;

/// Pointer state for a single frame (logical coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub pos: Vec2,
    pub is_down: bool,
}

impl InputSnapshot {
    pub fn new(x: f32, y: f32, is_down: bool) -> Self {
        Self {
            pos: Vec2::new(x, y),
            is_down,
        }
    }

    /// Pointer up at the given position
    pub fn released(x: f32, y: f32) -> Self {
        Self::new(x, y, false)
    }
}

/// Raw device events in client (page) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Mouse down or touch start on the render surface
    Down { client: Vec2 },
    /// Mouse or touch moved
    Move { client: Vec2 },
    /// Mouse up or touch end anywhere in the window
    Up,
}

/// Placement of the render surface on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// Top-left corner of the surface in client coordinates
    pub origin: Vec2,
    /// Size the surface is displayed at (CSS pixels)
    pub rendered_size: Vec2,
    /// Size of the logical coordinate space
    pub logical_size: Vec2,
}

impl Default for SurfaceGeometry {
    /// Surface displayed at exactly its logical size at the page origin
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            rendered_size: logical_size(),
            logical_size: logical_size(),
        }
    }
}

impl SurfaceGeometry {
    pub fn new(origin: Vec2, rendered_size: Vec2) -> Self {
        Self {
            origin,
            rendered_size,
            logical_size: logical_size(),
        }
    }

    /// Map a client position into logical space.
    ///
    /// Returns None while the surface has no visible size.
    pub fn to_logical(&self, client: Vec2) -> Option<Vec2> {
        if !(self.rendered_size.x > 0.0 && self.rendered_size.y > 0.0) {
            return None;
        }
        let scale = self.logical_size / self.rendered_size;
        Some((client - self.origin) * scale)
    }
}

/// Tracks the single logical pointer
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    surface: SurfaceGeometry,
    current: InputSnapshot,
}

impl InputRouter {
    pub fn new(surface: SurfaceGeometry) -> Self {
        Self {
            surface,
            current: InputSnapshot::default(),
        }
    }

    /// Replace the surface geometry (canvas resized or scrolled)
    pub fn resize(&mut self, surface: SurfaceGeometry) {
        self.surface = surface;
    }

    pub fn surface(&self) -> &SurfaceGeometry {
        &self.surface
    }

    /// Apply one device event
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { client } => {
                self.move_to(client);
                self.current.is_down = true;
            }
            PointerEvent::Move { client } => {
                self.move_to(client);
            }
            PointerEvent::Up => {
                self.current.is_down = false;
            }
        }
    }

    /// Release the pointer (focus lost, page hidden)
    pub fn release(&mut self) {
        self.current.is_down = false;
    }

    /// Copy of the pointer state for this frame
    pub fn snapshot(&self) -> InputSnapshot {
        self.current
    }

    fn move_to(&mut self, client: Vec2) {
        match self.surface.to_logical(client) {
            Some(pos) => self.current.pos = pos,
            None => log::trace!("Ignoring pointer position on zero-sized surface"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let surface = SurfaceGeometry::default();
        assert_eq!(
            surface.to_logical(Vec2::new(300.0, 200.0)),
            Some(Vec2::new(300.0, 200.0))
        );
    }

    #[test]
    fn test_scaled_and_offset_mapping() {
        // Canvas shown at half size, 20px from the left, 10px from the top
        let surface = SurfaceGeometry::new(Vec2::new(20.0, 10.0), Vec2::new(480.0, 270.0));
        let logical = surface.to_logical(Vec2::new(170.0, 110.0)).unwrap();
        assert_eq!(logical, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_zero_sized_surface_does_not_map() {
        let surface = SurfaceGeometry::new(Vec2::ZERO, Vec2::new(0.0, 270.0));
        assert_eq!(surface.to_logical(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_down_move_up() {
        let mut router = InputRouter::default();
        assert_eq!(router.snapshot(), InputSnapshot::default());

        router.handle(PointerEvent::Down {
            client: Vec2::new(300.0, 200.0),
        });
        assert_eq!(router.snapshot(), InputSnapshot::new(300.0, 200.0, true));

        // Move keeps the button state
        router.handle(PointerEvent::Move {
            client: Vec2::new(310.0, 220.0),
        });
        assert_eq!(router.snapshot(), InputSnapshot::new(310.0, 220.0, true));

        // Up clears it and keeps the last position
        router.handle(PointerEvent::Up);
        assert_eq!(router.snapshot(), InputSnapshot::new(310.0, 220.0, false));
    }

    #[test]
    fn test_move_without_press_stays_up() {
        let mut router = InputRouter::default();
        router.handle(PointerEvent::Move {
            client: Vec2::new(50.0, 60.0),
        });
        let snap = router.snapshot();
        assert!(!snap.is_down);
        assert_eq!(snap.pos, Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_up_is_unconditional() {
        let mut router = InputRouter::default();
        router.handle(PointerEvent::Down {
            client: Vec2::new(300.0, 200.0),
        });
        // Dragged far off the surface, then released
        router.handle(PointerEvent::Move {
            client: Vec2::new(-500.0, 2000.0),
        });
        router.handle(PointerEvent::Up);
        assert!(!router.snapshot().is_down);

        // A stray second release is harmless
        router.handle(PointerEvent::Up);
        assert!(!router.snapshot().is_down);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut router = InputRouter::default();
        router.handle(PointerEvent::Down {
            client: Vec2::new(300.0, 200.0),
        });
        let frame = router.snapshot();
        router.handle(PointerEvent::Up);
        assert!(frame.is_down);
        assert!(!router.snapshot().is_down);
    }

    #[test]
    fn test_resize_changes_mapping() {
        let mut router = InputRouter::default();
        router.resize(SurfaceGeometry::new(Vec2::ZERO, Vec2::new(1920.0, 1080.0)));
        router.handle(PointerEvent::Down {
            client: Vec2::new(600.0, 400.0),
        });
        assert_eq!(router.snapshot().pos, Vec2::new(300.0, 200.0));
    }
}
