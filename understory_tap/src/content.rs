// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a tappable renders: fixed content, or content computed from the tap state.

use alloc::boxed::Box;
use core::fmt;

use crate::state::TapState;

/// Render function over the current tap state.
pub type RenderFn<T> = Box<dyn Fn(TapState) -> T>;

/// Content of a tappable, resolved once per render.
pub enum Content<T> {
    /// Handed through untouched; only the surface handle is attached.
    Fixed(T),
    /// Recomputed from the tap state on every render.
    Render(RenderFn<T>),
}

impl<T> Content<T> {
    /// Fixed content.
    pub fn fixed(value: T) -> Self {
        Self::Fixed(value)
    }

    /// Content computed by `f`.
    pub fn render(f: impl Fn(TapState) -> T + 'static) -> Self {
        Self::Render(Box::new(f))
    }

    /// Returns `true` if the content depends on the tap state.
    pub fn depends_on_state(&self) -> bool {
        matches!(self, Self::Render(_))
    }
}

impl<T: Clone> Content<T> {
    /// Produces the content for `state`.
    pub fn resolve(&self, state: TapState) -> T {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::Render(f) => f(state),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Content<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::Render(_) => f.write_str("Render(..)"),
        }
    }
}
