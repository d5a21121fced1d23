// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element handle contract: what the tap machine needs from the host's surface tree.
//!
//! The host (DOM binding, retained widget tree, test double, ...) implements
//! [`ElementHandle`] for a live reference to one interactive surface. The machine
//! uses it to subscribe to input, reflect attributes, walk ancestors for scroll and
//! containment checks, and issue programmatic focus.
//!
//! Listener subscriptions are expressed as [`EventKinds`] flags. The machine
//! registers each kind individually and keeps its own ledger, so hosts can count
//! calls to verify that every registration is released exactly once.

use alloc::string::String;
use core::fmt;

use bitflags::bitflags;

use crate::scroll::ScrollMetrics;

bitflags! {
    /// A set of input event kinds.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventKinds: u16 {
        /// Pointer entered the element.
        const POINTER_ENTER = 1 << 0;
        /// Pointer left the element.
        const POINTER_LEAVE = 1 << 1;
        /// Pointer button pressed over the element.
        const POINTER_DOWN = 1 << 2;
        /// Pointer moved (listened to globally during a press).
        const POINTER_MOVE = 1 << 3;
        /// Pointer button released (listened to globally during a press).
        const POINTER_UP = 1 << 4;
        /// A finger touched the element.
        const TOUCH_START = 1 << 5;
        /// Active touches moved.
        const TOUCH_MOVE = 1 << 6;
        /// A finger lifted.
        const TOUCH_END = 1 << 7;
        /// The platform cancelled the touch sequence.
        const TOUCH_CANCEL = 1 << 8;
        /// Activation (click) of the element.
        const CLICK = 1 << 9;
        /// The element gained focus.
        const FOCUS = 1 << 10;
        /// The element lost focus.
        const BLUR = 1 << 11;
        /// Key pressed while the element is the key target.
        const KEY_DOWN = 1 << 12;
        /// A native drag started from the element.
        const DRAG_START = 1 << 13;
    }
}

impl EventKinds {
    /// Kinds the machine listens to on the bound element for its whole bound lifetime.
    pub const ELEMENT: Self = Self::POINTER_ENTER
        .union(Self::POINTER_LEAVE)
        .union(Self::POINTER_DOWN)
        .union(Self::TOUCH_START)
        .union(Self::TOUCH_MOVE)
        .union(Self::TOUCH_END)
        .union(Self::TOUCH_CANCEL)
        .union(Self::CLICK)
        .union(Self::FOCUS)
        .union(Self::BLUR)
        .union(Self::KEY_DOWN)
        .union(Self::DRAG_START);

    /// Kinds acquired globally while a pointer press is in progress.
    pub const PRESS: Self = Self::POINTER_UP.union(Self::POINTER_MOVE);
}

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// On the bound element itself.
    Element,
    /// On the whole document/window, so releases outside the element are seen.
    Global,
}

/// Native attributes reflected from configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// The "disabled" marker.
    Disabled,
    /// Tab order participation.
    TabIndex,
}

impl Attribute {
    /// Attribute name as a markup host would spell it.
    pub fn name(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::TabIndex => "tabindex",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A live reference to the concrete interactive surface.
///
/// `Node` identifies surfaces in the host tree. [`ElementHandle::node`] doubles as
/// the identity used to detect rebinding: two handles are the same binding iff
/// their nodes compare equal.
pub trait ElementHandle {
    /// Host node identifier.
    type Node: Copy + Eq + fmt::Debug;

    /// The bound surface.
    fn node(&self) -> Self::Node;

    /// Parent of `node` in the host tree, `None` at the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Content and visible extents plus scroll offsets of `node`.
    fn scroll_metrics(&self, node: Self::Node) -> ScrollMetrics;

    /// Registers one listener kind in `scope`.
    fn add_listener(&mut self, scope: ListenerScope, kind: EventKinds);

    /// Releases one listener kind in `scope`.
    fn remove_listener(&mut self, scope: ListenerScope, kind: EventKinds);

    /// Current value of `attribute` on the bound surface.
    fn attribute(&self, attribute: Attribute) -> Option<String>;

    /// Sets `attribute` on the bound surface.
    fn set_attribute(&mut self, attribute: Attribute, value: &str);

    /// Removes `attribute` from the bound surface.
    fn remove_attribute(&mut self, attribute: Attribute);

    /// Moves focus to the bound surface.
    fn focus(&mut self);

    /// Whether the surface is a native button, which synthesizes a click on Enter.
    fn is_native_button(&self) -> bool {
        false
    }

    /// Whether the surface is still attached to the host tree.
    fn is_connected(&self) -> bool {
        true
    }
}

/// Returns `true` if `target` is the bound surface or one of its descendants.
pub fn contains<H: ElementHandle + ?Sized>(handle: &H, target: H::Node) -> bool {
    let root = handle.node();
    let mut current = Some(target);
    while let Some(node) = current {
        if node == root {
            return true;
        }
        current = handle.parent(node);
    }
    false
}
