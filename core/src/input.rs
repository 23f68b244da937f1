//! The view-state machine.
//!
//! One enum covers the three mutually exclusive pointer interactions: idle,
//! drawing a stroke on the surface, and dragging the result panel. The DOM
//! layer translates raw events into [`Event`] values, feeds them through
//! [`step`], and executes the returned [`Effect`] against the canvas or the
//! panel. Keeping the transition function pure lets the whole gesture model
//! be tested with synthetic event sequences.
//!
//! An active gesture records the pointer that started it, and [`step`]
//! ignores events from any other pointer, so only the first active pointer
//! ever draws or drags.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;

/// The active pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A stroke is being drawn by `pointer`; `last` is the most recent
    /// committed point.
    Drawing { pointer: i32, last: Point },
    /// The result panel is being dragged by `pointer`; `grab` is the pointer
    /// offset from the panel origin captured at grab time.
    DraggingResult { pointer: i32, grab: Point },
}

/// A normalized pointer event. Every variant carries the browser's pointer
/// id so the machine can tell the owning pointer from bystanders.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Primary pointer down on the drawing surface.
    CanvasDown { pointer: i32, point: Point },
    /// Pointer moved (canvas-relative while drawing, viewport-relative while
    /// dragging; the caller supplies the right frame).
    PointerMove { pointer: i32, point: Point },
    /// Primary pointer released or the gesture was cancelled.
    PointerUp { pointer: i32 },
    /// Pointer left the drawing surface. Ends a stroke; a panel drag keeps
    /// going because it is tracked at the document level.
    CanvasLeave { pointer: i32 },
    /// Primary pointer down on the result panel. `position` is the viewport
    /// position, `panel` the panel origin at that instant.
    ResultGrab {
        pointer: i32,
        position: Point,
        panel: Point,
    },
}

/// What the DOM layer must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Start a new path at the point.
    BeginPath(Point),
    /// Rasterize one segment in the current color.
    DrawSegment { from: Point, to: Point },
    /// Reposition the result panel to this viewport origin.
    MoveResult(Point),
}

/// Advance the gesture by one event.
pub fn step(gesture: Gesture, event: Event) -> (Gesture, Option<Effect>) {
    match (gesture, event) {
        (Gesture::Idle, Event::CanvasDown { pointer, point }) => (
            Gesture::Drawing {
                pointer,
                last: point,
            },
            Some(Effect::BeginPath(point)),
        ),
        (
            Gesture::Idle,
            Event::ResultGrab {
                pointer,
                position,
                panel,
            },
        ) => (
            Gesture::DraggingResult {
                pointer,
                grab: position.offset_from(panel),
            },
            None,
        ),
        (
            Gesture::Drawing { pointer, last },
            Event::PointerMove {
                pointer: moved,
                point,
            },
        ) if moved == pointer => (
            Gesture::Drawing {
                pointer,
                last: point,
            },
            Some(Effect::DrawSegment {
                from: last,
                to: point,
            }),
        ),
        (
            Gesture::Drawing { pointer, .. },
            Event::PointerUp { pointer: released } | Event::CanvasLeave { pointer: released },
        ) if released == pointer => (Gesture::Idle, None),
        // Anything else mid-stroke is a bystander: a second pointer going
        // down, moving, or releasing never touches the active stroke.
        (drawing @ Gesture::Drawing { .. }, _) => (drawing, None),
        (
            Gesture::DraggingResult { pointer, grab },
            Event::PointerMove {
                pointer: moved,
                point,
            },
        ) if moved == pointer => (
            Gesture::DraggingResult { pointer, grab },
            Some(Effect::MoveResult(point.offset_from(grab))),
        ),
        (Gesture::DraggingResult { pointer, .. }, Event::PointerUp { pointer: released })
            if released == pointer =>
        {
            (Gesture::Idle, None)
        }
        // The pointer routinely leaves the canvas (and the panel) during a
        // drag, and other pointers are bystanders; only the grabbing
        // pointer's release ends it.
        (dragging @ Gesture::DraggingResult { .. }, _) => (dragging, None),
        (
            Gesture::Idle,
            Event::PointerMove { .. } | Event::PointerUp { .. } | Event::CanvasLeave { .. },
        ) => (Gesture::Idle, None),
    }
}
