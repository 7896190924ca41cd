//! Input model: events from the host, cursor affordances, and the drag state.
//!
//! `InputEvent` is what the host forwards from the drawing surface, in screen
//! coordinates relative to the surface's top-left corner. `InputState` is the
//! gesture tracked between pointer-down and pointer-up, carrying everything
//! needed to recompute the drag from its start on every move.

use crate::geometry::Point;
use crate::scene::ElementId;

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// A raw input event forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove { screen: Point },
    PointerDown { screen: Point },
    PointerUp,
    /// Wheel / trackpad scroll; positive `delta_y` scrolls down (zooms out).
    Wheel { delta_y: f64, screen: Point },
    /// The pointer left the drawing surface.
    PointerLeave,
}

/// Cursor affordance the host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Something interactive is under the pointer.
    Pointer,
}

impl Cursor {
    /// The CSS `cursor` keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
        }
    }
}

/// What a drag gesture moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// An element, by id.
    Element(ElementId),
    /// The viewport itself (panning).
    Viewport,
}

/// Internal state for the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; pointer moves update hover.
    #[default]
    Idle,
    /// Pointer is down and moving `target`.
    Dragging {
        target: DragTarget,
        /// Screen-space pointer position at pointer-down.
        origin: Point,
        /// Element world position (or viewport translation) at pointer-down.
        element_origin: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
