#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! # Design Notes
//!
//! - Pointer coordinates are row-local logical pixels.
//! - Touch and mouse input are folded into one pointer stream; the host
//!   delivers a single pointer lifecycle at a time per row.

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A pointer (touch or mouse) event.
    Pointer(PointerEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),

    /// Periodic host tick. Carries no data.
    Tick,
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerKind, pos: Point) -> Self {
        Self { kind, pos }
    }

    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y))
    }

    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y))
    }

    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y))
    }

    #[must_use]
    pub const fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Cancel, Point::new(x, y))
    }
}

impl From<PointerEvent> for Event {
    fn from(ev: PointerEvent) -> Self {
        Self::Pointer(ev)
    }
}

/// Phase of a pointer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Finger touched down / button pressed.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Finger lifted / button released.
    Up,
    /// The platform took the pointer away (e.g. system gesture).
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(PointerEvent::down(1.0, 2.0).kind, PointerKind::Down);
        assert_eq!(PointerEvent::moved(1.0, 2.0).kind, PointerKind::Move);
        assert_eq!(PointerEvent::up(1.0, 2.0).kind, PointerKind::Up);
        assert_eq!(PointerEvent::cancel(1.0, 2.0).kind, PointerKind::Cancel);
        assert_eq!(PointerEvent::up(1.0, 2.0).pos, Point::new(1.0, 2.0));
    }

    #[test]
    fn pointer_into_event() {
        let ev: Event = PointerEvent::down(0.0, 0.0).into();
        assert!(matches!(ev, Event::Pointer(p) if p.kind == PointerKind::Down));
    }
}
