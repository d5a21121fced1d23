// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller configuration: behavior flags, tab order and outward callbacks.
//!
//! ```
//! use understory_tap::config::{TabIndex, TapConfig};
//!
//! let config = TapConfig::<u32>::new()
//!     .pinchable(true)
//!     .tab_index(TabIndex::from(2))
//!     .on_tap(|_event| {});
//! assert!(config.is_pinchable);
//! assert!(config.validate().is_ok());
//! ```

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;

use crate::event::InputEvent;
use crate::state::TapState;
use crate::touch::TouchPoint;

/// Tab order value reflected onto the element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TabIndex {
    /// Numeric order.
    Order(i32),
    /// Textual value, passed through verbatim; must parse as an integer.
    Text(Cow<'static, str>),
}

impl TabIndex {
    /// Attribute text for this value.
    pub fn to_attribute(&self) -> String {
        match self {
            Self::Order(order) => order.to_string(),
            Self::Text(text) => text.to_string(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Order(_) => Ok(()),
            Self::Text(text) => text
                .trim()
                .parse::<i32>()
                .map(|_| ())
                .map_err(|_| ConfigError::InvalidTabIndex(text.to_string())),
        }
    }
}

impl Default for TabIndex {
    fn default() -> Self {
        Self::Order(0)
    }
}

impl From<i32> for TabIndex {
    fn from(order: i32) -> Self {
        Self::Order(order)
    }
}

impl From<&'static str> for TabIndex {
    fn from(text: &'static str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for TabIndex {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

/// Configuration rejected before any interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A textual tab index that is not an integer.
    InvalidTabIndex(String),
    /// A tappable was built without content.
    MissingContent,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTabIndex(text) => write!(f, "tab index {text:?} is not an integer"),
            Self::MissingContent => f.write_str("tappable requires content"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Handler for taps. `None` when the tap was synthesized from the keyboard timer.
pub type TapHandler<N> = Box<dyn FnMut(Option<&InputEvent<N>>)>;
/// Handler for tap start/move/end with the current touch points.
pub type TapPhaseHandler<N> = Box<dyn FnMut(Option<&InputEvent<N>>, &[TouchPoint])>;
/// Handler for pinch start/move/end.
pub type PinchHandler<N> = Box<dyn FnMut(&InputEvent<N>, &[TouchPoint])>;
/// Handler for focus and blur.
pub type FocusHandler<N> = Box<dyn FnMut(&InputEvent<N>)>;
/// Handler receiving every new tap state snapshot.
pub type TapStateHandler = Box<dyn FnMut(TapState)>;

/// Optional outward callbacks.
pub struct TapCallbacks<N> {
    /// Activation by click or Enter.
    pub on_tap: Option<TapHandler<N>>,
    /// A tap gesture started.
    pub on_tap_start: Option<TapPhaseHandler<N>>,
    /// A tap gesture moved.
    pub on_tap_move: Option<TapPhaseHandler<N>>,
    /// A tap gesture ended or was cancelled.
    pub on_tap_end: Option<TapPhaseHandler<N>>,
    /// A two-finger pinch started.
    pub on_pinch_start: Option<PinchHandler<N>>,
    /// A pinch moved.
    pub on_pinch_move: Option<PinchHandler<N>>,
    /// A pinch ended.
    pub on_pinch_end: Option<PinchHandler<N>>,
    /// Focus accepted.
    pub on_focus: Option<FocusHandler<N>>,
    /// Focus lost.
    pub on_blur: Option<FocusHandler<N>>,
    /// Tap state changed.
    pub on_change_tap_state: Option<TapStateHandler>,
}

impl<N> Default for TapCallbacks<N> {
    fn default() -> Self {
        Self {
            on_tap: None,
            on_tap_start: None,
            on_tap_move: None,
            on_tap_end: None,
            on_pinch_start: None,
            on_pinch_move: None,
            on_pinch_end: None,
            on_focus: None,
            on_blur: None,
            on_change_tap_state: None,
        }
    }
}

impl<N> fmt::Debug for TapCallbacks<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapCallbacks")
            .field("on_tap", &self.on_tap.is_some())
            .field("on_tap_start", &self.on_tap_start.is_some())
            .field("on_tap_move", &self.on_tap_move.is_some())
            .field("on_tap_end", &self.on_tap_end.is_some())
            .field("on_pinch_start", &self.on_pinch_start.is_some())
            .field("on_pinch_move", &self.on_pinch_move.is_some())
            .field("on_pinch_end", &self.on_pinch_end.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("on_change_tap_state", &self.on_change_tap_state.is_some())
            .finish()
    }
}

/// Behavior flags, tab order and callbacks for one tappable element.
#[derive(Debug)]
pub struct TapConfig<N> {
    /// Ignore all input and fire no callbacks.
    pub is_disabled: bool,
    /// Accept focus; when `false`, focus events are stopped and ignored.
    pub is_focusable: bool,
    /// Recognize two-finger pinches.
    pub is_pinchable: bool,
    /// Tab order reflected while focusable and enabled.
    pub tab_index: TabIndex,
    /// Suppress the focus that follows a pointer press.
    pub prevent_focus_on_tap: bool,
    /// Write `disabled`/`tabindex` onto the element.
    pub should_reflect_attributes: bool,
    /// Outward callbacks.
    pub callbacks: TapCallbacks<N>,
}

impl<N> Default for TapConfig<N> {
    fn default() -> Self {
        Self {
            is_disabled: false,
            is_focusable: true,
            is_pinchable: false,
            tab_index: TabIndex::default(),
            prevent_focus_on_tap: true,
            should_reflect_attributes: true,
            callbacks: TapCallbacks::default(),
        }
    }
}

impl<N> TapConfig<N> {
    /// Default configuration: enabled, focusable, tab index 0, focus prevented on tap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks values that can only be wrong at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tab_index.validate()
    }

    /// Sets `is_disabled`.
    #[must_use]
    pub fn disabled(mut self, value: bool) -> Self {
        self.is_disabled = value;
        self
    }

    /// Sets `is_focusable`.
    #[must_use]
    pub fn focusable(mut self, value: bool) -> Self {
        self.is_focusable = value;
        self
    }

    /// Sets `is_pinchable`.
    #[must_use]
    pub fn pinchable(mut self, value: bool) -> Self {
        self.is_pinchable = value;
        self
    }

    /// Sets the tab index.
    #[must_use]
    pub fn tab_index(mut self, value: impl Into<TabIndex>) -> Self {
        self.tab_index = value.into();
        self
    }

    /// Sets `prevent_focus_on_tap`.
    #[must_use]
    pub fn prevent_focus_on_tap(mut self, value: bool) -> Self {
        self.prevent_focus_on_tap = value;
        self
    }

    /// Sets `should_reflect_attributes`.
    #[must_use]
    pub fn reflect_attributes(mut self, value: bool) -> Self {
        self.should_reflect_attributes = value;
        self
    }

    /// Sets the tap handler.
    #[must_use]
    pub fn on_tap(mut self, f: impl FnMut(Option<&InputEvent<N>>) + 'static) -> Self {
        self.callbacks.on_tap = Some(Box::new(f));
        self
    }

    /// Sets the tap start handler.
    #[must_use]
    pub fn on_tap_start(
        mut self,
        f: impl FnMut(Option<&InputEvent<N>>, &[TouchPoint]) + 'static,
    ) -> Self {
        self.callbacks.on_tap_start = Some(Box::new(f));
        self
    }

    /// Sets the tap move handler.
    #[must_use]
    pub fn on_tap_move(
        mut self,
        f: impl FnMut(Option<&InputEvent<N>>, &[TouchPoint]) + 'static,
    ) -> Self {
        self.callbacks.on_tap_move = Some(Box::new(f));
        self
    }

    /// Sets the tap end handler.
    #[must_use]
    pub fn on_tap_end(
        mut self,
        f: impl FnMut(Option<&InputEvent<N>>, &[TouchPoint]) + 'static,
    ) -> Self {
        self.callbacks.on_tap_end = Some(Box::new(f));
        self
    }

    /// Sets the pinch start handler.
    #[must_use]
    pub fn on_pinch_start(mut self, f: impl FnMut(&InputEvent<N>, &[TouchPoint]) + 'static) -> Self {
        self.callbacks.on_pinch_start = Some(Box::new(f));
        self
    }

    /// Sets the pinch move handler.
    #[must_use]
    pub fn on_pinch_move(mut self, f: impl FnMut(&InputEvent<N>, &[TouchPoint]) + 'static) -> Self {
        self.callbacks.on_pinch_move = Some(Box::new(f));
        self
    }

    /// Sets the pinch end handler.
    #[must_use]
    pub fn on_pinch_end(mut self, f: impl FnMut(&InputEvent<N>, &[TouchPoint]) + 'static) -> Self {
        self.callbacks.on_pinch_end = Some(Box::new(f));
        self
    }

    /// Sets the focus handler.
    #[must_use]
    pub fn on_focus(mut self, f: impl FnMut(&InputEvent<N>) + 'static) -> Self {
        self.callbacks.on_focus = Some(Box::new(f));
        self
    }

    /// Sets the blur handler.
    #[must_use]
    pub fn on_blur(mut self, f: impl FnMut(&InputEvent<N>) + 'static) -> Self {
        self.callbacks.on_blur = Some(Box::new(f));
        self
    }

    /// Sets the tap state change handler.
    #[must_use]
    pub fn on_change_tap_state(mut self, f: impl FnMut(TapState) + 'static) -> Self {
        self.callbacks.on_change_tap_state = Some(Box::new(f));
        self
    }
}
