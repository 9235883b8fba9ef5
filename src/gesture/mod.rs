//! Pointer/touch gesture interpretation.
//!
//! `reduce` is a pure function over `DragState`; the engine feeds it raw
//! pointer events and applies whatever command comes back.

use crate::geometry::Point;
use crate::input::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl AxisLock {
    /// Axis of the dominant component; ties go horizontal, no movement locks nothing.
    pub fn from_delta(delta: Point) -> Self {
        if delta.x == 0.0 && delta.y == 0.0 {
            Self::None
        } else if delta.x.abs() >= delta.y.abs() {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub origin: Point,
    pub current: Point,
    pub axis: AxisLock,
}

impl Drag {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            current: origin,
            axis: AxisLock::None,
        }
    }

    pub fn delta(&self) -> Point {
        self.current.delta_from(self.origin)
    }

    fn track(&mut self, position: Point) {
        self.current = position;
        if self.axis == AxisLock::None {
            self.axis = AxisLock::from_delta(self.delta());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Tracking(Drag),
}

impl DragState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerTarget {
    #[default]
    Surface,
    /// Text inputs keep native pointer behaviour and never start a drag.
    TextInput,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        position: Point,
        target: PointerTarget,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    /// Pointer left the overlay mid-drag; treated like `Up`.
    Leave {
        position: Point,
    },
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// False for non-draggable or single-slide galleries.
    pub enabled: bool,
    pub threshold: f64,
    pub vertical_dismiss: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureCommand {
    /// Horizontal track offset in pixels while dragging.
    Offset(f64),
    Navigate(Direction),
    Dismiss,
    SnapBack,
}

fn commit(drag: Drag, context: GestureContext) -> Option<GestureCommand> {
    let delta = drag.delta();
    match drag.axis {
        AxisLock::None => None,
        AxisLock::Horizontal if delta.x.abs() > context.threshold => {
            Some(GestureCommand::Navigate(if delta.x < 0.0 {
                Direction::Next
            } else {
                Direction::Prev
            }))
        }
        AxisLock::Vertical if context.vertical_dismiss && delta.y.abs() > context.threshold => {
            Some(GestureCommand::Dismiss)
        }
        AxisLock::Horizontal | AxisLock::Vertical => Some(GestureCommand::SnapBack),
    }
}

pub fn reduce(
    state: DragState,
    event: PointerEvent,
    context: GestureContext,
) -> (DragState, Option<GestureCommand>) {
    match (state, event) {
        (_, PointerEvent::Down { position, target }) => {
            if !context.enabled || target == PointerTarget::TextInput {
                return (DragState::Idle, None);
            }
            (DragState::Tracking(Drag::new(position)), None)
        }
        (DragState::Tracking(mut drag), PointerEvent::Move { position }) => {
            drag.track(position);
            let command = match drag.axis {
                AxisLock::Horizontal => Some(GestureCommand::Offset(drag.delta().x)),
                AxisLock::None | AxisLock::Vertical => None,
            };
            (DragState::Tracking(drag), command)
        }
        (
            DragState::Tracking(mut drag),
            PointerEvent::Up { position } | PointerEvent::Leave { position },
        ) => {
            drag.track(position);
            (DragState::Idle, commit(drag, context))
        }
        (DragState::Tracking(drag), PointerEvent::Cancel) => {
            let command = (drag.axis != AxisLock::None).then_some(GestureCommand::SnapBack);
            (DragState::Idle, command)
        }
        (DragState::Idle, _) => (DragState::Idle, None),
    }
}
