// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Tap: one tap state for pointer, touch, keyboard and focus input.
//!
//! Buttons, links and custom controls all want the same three facts about
//! themselves: is it pressed, is it hovered, is it focused. Getting them right
//! means reconciling several overlapping and platform-inconsistent event
//! streams: compatibility mouse events after touches, taps that turn out to be
//! scrolls, second fingers that start a pinch, focus that follows a press, and
//! Enter on a focused element. This crate does that once.
//!
//! - [`machine::TapMachine`] is the state machine. It binds to one
//!   [`element::ElementHandle`], takes raw [`event::InputEvent`]s, keeps a
//!   [`state::TapState`], and fires the callbacks in [`config::TapCallbacks`].
//! - [`touch`] tracks per-finger origins and deltas across touch events.
//! - [`scroll`] detects when a touch gesture is really a scroll of an ancestor.
//! - [`attributes`] reflects `disabled` and `tabindex` onto the element.
//! - [`tappable::Tappable`] bundles a machine with its [`content::Content`]
//!   and [`refs::MergedRef`] consumers for a renderer.
//!
//! The crate does not render, lay out, or own a clock. The host implements
//! [`element::ElementHandle`] over its surface tree, delivers events with
//! millisecond timestamps, and drives deferred work with
//! [`machine::TapMachine::run_deferred`].
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use understory_tap::config::TapConfig;
//! use understory_tap::element::{Attribute, ElementHandle, EventKinds, ListenerScope};
//! use understory_tap::event::InputEvent;
//! use understory_tap::machine::TapMachine;
//! use understory_tap::scroll::ScrollMetrics;
//!
//! /// A single surface with no ancestors.
//! struct Button;
//!
//! impl ElementHandle for Button {
//!     type Node = u32;
//!     fn node(&self) -> u32 { 1 }
//!     fn parent(&self, _: u32) -> Option<u32> { None }
//!     fn scroll_metrics(&self, _: u32) -> ScrollMetrics { ScrollMetrics::default() }
//!     fn add_listener(&mut self, _: ListenerScope, _: EventKinds) {}
//!     fn remove_listener(&mut self, _: ListenerScope, _: EventKinds) {}
//!     fn attribute(&self, _: Attribute) -> Option<String> { None }
//!     fn set_attribute(&mut self, _: Attribute, _: &str) {}
//!     fn remove_attribute(&mut self, _: Attribute) {}
//!     fn focus(&mut self) {}
//! }
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (start, end) = (log.clone(), log.clone());
//! let config = TapConfig::new()
//!     .on_tap_start(move |_, _| start.borrow_mut().push("start"))
//!     .on_tap_end(move |_, _| end.borrow_mut().push("end"));
//!
//! let mut machine = TapMachine::<Button>::new(config).unwrap();
//! machine.bind(Button);
//!
//! machine.handle(&InputEvent::pointer_down(Point::new(5.0, 5.0)), 0);
//! assert!(machine.state().is_pressed);
//!
//! machine.handle(&InputEvent::PointerUp { position: Point::new(5.0, 5.0), target: Some(1) }, 80);
//! assert!(!machine.state().is_pressed);
//! assert!(machine.state().is_hovered);
//! assert_eq!(*log.borrow(), ["start", "end"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with the standard library.
//! - `libm`: build Kurbo's float math with `libm` for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod attributes;
pub mod config;
pub mod content;
pub mod deferred;
pub mod element;
pub mod event;
pub mod machine;
pub mod refs;
pub mod scroll;
pub mod state;
pub mod tappable;
pub mod touch;
