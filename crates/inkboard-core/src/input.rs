//! Pointer events and the per-drag session.

use crate::style::StrokeParams;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    Leave { position: Point },
}

impl PointerEvent {
    /// Viewport position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::Leave { position } => position,
        }
    }
}

/// Pointer phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerPhase {
    #[default]
    Idle,
    Dragging,
}

/// State of one drag, from pointer-down to pointer-up or leave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSession {
    /// Where the drag started, in surface space.
    pub origin: Point,
    /// Most recent pointer position, in surface space.
    pub last_point: Point,
    /// Paint of the most recent draw (or of the pointer-down, before any).
    pub params: StrokeParams,
    /// Whether the surface was checkpointed for undo during this drag.
    pub(crate) checkpointed: bool,
}

impl PointerSession {
    pub(crate) fn begin(origin: Point, params: StrokeParams) -> Self {
        Self {
            origin,
            last_point: origin,
            params,
            checkpointed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::HexColor;

    #[test]
    fn test_event_position() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(PointerEvent::Down { position: p }.position(), p);
        assert_eq!(PointerEvent::Leave { position: p }.position(), p);
    }

    #[test]
    fn test_session_begins_at_origin() {
        let params = StrokeParams { color: HexColor::BLACK, width: 3 };
        let session = PointerSession::begin(Point::new(7.0, 8.0), params);
        assert_eq!(session.origin, session.last_point);
        assert!(!session.checkpointed);
    }

    #[test]
    fn test_event_serde() {
        let event = PointerEvent::Move { position: Point::new(1.5, 2.0) };
        let json = serde_json::to_string(&event).unwrap();
        let back: PointerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
