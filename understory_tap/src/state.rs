// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap state snapshot and partial updates.
//!
//! [`TapState`] is an immutable value: every transition builds a new snapshot by
//! shallow-merging a [`TapStatePatch`] over the previous one.
//!
//! ```
//! use understory_tap::state::{TapState, TapStatePatch};
//!
//! let state = TapState::default();
//! let next = state.merge(TapStatePatch::pressed(true).with_hovered(true));
//! assert!(next.is_pressed && next.is_hovered && !next.is_focused);
//!
//! // Fields absent from the patch are carried over.
//! let released = next.merge(TapStatePatch::pressed(false));
//! assert!(!released.is_pressed && released.is_hovered);
//! ```

/// The `{pressed, hovered, focused}` snapshot of an interactive element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TapState {
    /// A press (pointer, touch or keyboard) is in progress.
    pub is_pressed: bool,
    /// The pointer is over the element, or a touch is active on it.
    pub is_hovered: bool,
    /// The element holds focus.
    pub is_focused: bool,
}

impl TapState {
    /// Returns a new snapshot with every field set in `patch` replaced.
    #[must_use]
    pub fn merge(self, patch: TapStatePatch) -> Self {
        Self {
            is_pressed: patch.is_pressed.unwrap_or(self.is_pressed),
            is_hovered: patch.is_hovered.unwrap_or(self.is_hovered),
            is_focused: patch.is_focused.unwrap_or(self.is_focused),
        }
    }
}

/// A partial [`TapState`]; `None` fields keep their previous value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TapStatePatch {
    /// New `is_pressed`, if changing.
    pub is_pressed: Option<bool>,
    /// New `is_hovered`, if changing.
    pub is_hovered: Option<bool>,
    /// New `is_focused`, if changing.
    pub is_focused: Option<bool>,
}

impl TapStatePatch {
    /// Patch that only sets `is_pressed`.
    #[must_use]
    pub fn pressed(value: bool) -> Self {
        Self {
            is_pressed: Some(value),
            ..Self::default()
        }
    }

    /// Patch that only sets `is_hovered`.
    #[must_use]
    pub fn hovered(value: bool) -> Self {
        Self {
            is_hovered: Some(value),
            ..Self::default()
        }
    }

    /// Patch that only sets `is_focused`.
    #[must_use]
    pub fn focused(value: bool) -> Self {
        Self {
            is_focused: Some(value),
            ..Self::default()
        }
    }

    /// Also set `is_hovered`.
    #[must_use]
    pub fn with_hovered(mut self, value: bool) -> Self {
        self.is_hovered = Some(value);
        self
    }

    /// Returns `true` if this patch begins a press.
    pub fn starts_press(&self) -> bool {
        self.is_pressed == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_all_false() {
        let s = TapState::default();
        assert!(!s.is_pressed);
        assert!(!s.is_hovered);
        assert!(!s.is_focused);
    }

    #[test]
    fn empty_patch_is_identity() {
        let s = TapState {
            is_pressed: true,
            is_hovered: false,
            is_focused: true,
        };
        assert_eq!(s.merge(TapStatePatch::default()), s);
    }

    #[test]
    fn merge_only_touches_set_fields() {
        let s = TapState {
            is_pressed: false,
            is_hovered: true,
            is_focused: true,
        };
        let next = s.merge(TapStatePatch::pressed(true));
        assert_eq!(
            next,
            TapState {
                is_pressed: true,
                is_hovered: true,
                is_focused: true,
            }
        );
    }

    #[test]
    fn starts_press_only_for_pressed_true() {
        assert!(TapStatePatch::pressed(true).starts_press());
        assert!(!TapStatePatch::pressed(false).starts_press());
        assert!(!TapStatePatch::hovered(true).starts_press());
    }
}
