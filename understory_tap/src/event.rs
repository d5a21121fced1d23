// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input events delivered by the host.

use kurbo::Point;
use smallvec::SmallVec;

use crate::element::EventKinds;
use crate::touch::RawTouch;

/// Active touches carried by a touch event.
pub type RawTouches = SmallVec<[RawTouch; 2]>;

/// Pointer button of a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main button, usually the left one.
    Primary,
    /// Usually the right button.
    Secondary,
    /// Usually the wheel button.
    Auxiliary,
}

/// Keys the machine distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// Any other key.
    Other,
}

/// One raw input event, generic over the host's node type.
///
/// Touch events carry the touches that are still active *after* the event,
/// so a `TouchEnd` that lifts the last finger carries an empty list.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent<N> {
    /// Pointer entered the element.
    PointerEnter,
    /// Pointer left the element.
    PointerLeave,
    /// Pointer button pressed over the element.
    PointerDown {
        /// Pressed button.
        button: PointerButton,
        /// Pointer position.
        position: Point,
    },
    /// Pointer moved anywhere.
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// Pointer button released anywhere.
    PointerUp {
        /// Pointer position.
        position: Point,
        /// Innermost node under the pointer, if any.
        target: Option<N>,
    },
    /// A finger touched the element.
    TouchStart {
        /// Active touches.
        touches: RawTouches,
    },
    /// Active touches moved.
    TouchMove {
        /// Active touches.
        touches: RawTouches,
    },
    /// A finger lifted.
    TouchEnd {
        /// Remaining active touches.
        touches: RawTouches,
    },
    /// The platform aborted the touch sequence.
    TouchCancel {
        /// Remaining active touches.
        touches: RawTouches,
    },
    /// The element gained focus.
    Focus,
    /// The element lost focus.
    Blur,
    /// A key was pressed.
    KeyDown {
        /// The key.
        key: Key,
    },
    /// The element was activated.
    Click {
        /// `false` when the host synthesized the click from the keyboard.
        pointer_originated: bool,
    },
    /// A native drag started.
    DragStart,
}

impl<N> InputEvent<N> {
    /// Primary-button press at `position`.
    pub fn pointer_down(position: Point) -> Self {
        Self::PointerDown {
            button: PointerButton::Primary,
            position,
        }
    }

    /// Touch start with the given active touches.
    pub fn touch_start(touches: impl IntoIterator<Item = RawTouch>) -> Self {
        Self::TouchStart {
            touches: touches.into_iter().collect(),
        }
    }

    /// Touch move with the given active touches.
    pub fn touch_move(touches: impl IntoIterator<Item = RawTouch>) -> Self {
        Self::TouchMove {
            touches: touches.into_iter().collect(),
        }
    }

    /// Touch end with the given remaining touches.
    pub fn touch_end(touches: impl IntoIterator<Item = RawTouch>) -> Self {
        Self::TouchEnd {
            touches: touches.into_iter().collect(),
        }
    }

    /// The listener kind this event is delivered through.
    pub fn kind(&self) -> EventKinds {
        match self {
            Self::PointerEnter => EventKinds::POINTER_ENTER,
            Self::PointerLeave => EventKinds::POINTER_LEAVE,
            Self::PointerDown { .. } => EventKinds::POINTER_DOWN,
            Self::PointerMove { .. } => EventKinds::POINTER_MOVE,
            Self::PointerUp { .. } => EventKinds::POINTER_UP,
            Self::TouchStart { .. } => EventKinds::TOUCH_START,
            Self::TouchMove { .. } => EventKinds::TOUCH_MOVE,
            Self::TouchEnd { .. } => EventKinds::TOUCH_END,
            Self::TouchCancel { .. } => EventKinds::TOUCH_CANCEL,
            Self::Focus => EventKinds::FOCUS,
            Self::Blur => EventKinds::BLUR,
            Self::KeyDown { .. } => EventKinds::KEY_DOWN,
            Self::Click { .. } => EventKinds::CLICK,
            Self::DragStart => EventKinds::DRAG_START,
        }
    }
}

/// What the host should do with the event after the machine handled it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// Keep propagating.
    #[default]
    Continue,
    /// Stop propagation to other listeners.
    Stop,
}
