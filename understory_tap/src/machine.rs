// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tap/pinch state machine.
//!
//! [`TapMachine`] binds to one [`ElementHandle`], listens to its input, and folds
//! pointer, touch, keyboard and focus events into a single [`TapState`] plus a
//! stream of outward callbacks.
//!
//! ## Gestures
//!
//! At most one gesture is active per machine:
//!
//! ```text
//! none  -> tap    (pointer down, or first touch)
//! tap   -> pinch  (second touch while pinchable: on_tap_end, on_pinch_start)
//! pinch -> tap    (back to one touch: on_pinch_end, on_tap_start)
//! tap   -> none   (release, last touch lifted, scroll detected, drag start)
//! pinch -> none   (last touch lifted: on_pinch_end)
//! ```
//!
//! ## Ordering
//!
//! Inside one call the state is updated before callbacks run, so a callback
//! reading [`TapMachine::state`] through shared state sees the snapshot for the
//! event being reported. Callbacks never run while the configuration is disabled.
//!
//! ## Time
//!
//! The machine has no clock. Pass the event time to [`TapMachine::handle`] and
//! call [`TapMachine::run_deferred`] after each dispatched input task and when
//! [`TapMachine::next_deadline`] passes.

use kurbo::Point;

use crate::attributes::sync_attributes;
use crate::config::{ConfigError, TapConfig};
use crate::deferred::{
    Deferred, DeferredQueue, FOCUS_SUPPRESSION_RESET_DELAY_MS, KEY_RELEASE_DELAY_MS,
};
use crate::element::{ElementHandle, EventKinds, ListenerScope, contains};
use crate::event::{InputEvent, Key, Outcome, PointerButton};
use crate::scroll::ScrollDetector;
use crate::state::{TapState, TapStatePatch};
use crate::touch::{MOUSE_TOUCH_ID, RawTouch, TouchList, TouchPoint, track_touches};

#[derive(Copy, Clone, Debug)]
enum TapPhase {
    Start,
    Move,
    End,
}

#[derive(Copy, Clone, Debug)]
enum PinchPhase {
    Start,
    Move,
    End,
}

/// Tap state machine bound to at most one element at a time.
#[derive(Debug)]
pub struct TapMachine<H: ElementHandle> {
    config: TapConfig<H::Node>,
    state: TapState,
    revision: u64,
    handle: Option<H>,
    element_listeners: EventKinds,
    global_listeners: EventKinds,
    touches: TouchList,
    scroll: ScrollDetector<H::Node>,
    deferred: DeferredQueue,
    is_touch_active: bool,
    is_pinching: bool,
    should_prevent_focus: bool,
    should_ignore_mouse_events: bool,
    is_unmounted: bool,
}

impl<H: ElementHandle> TapMachine<H> {
    /// Creates an unbound machine.
    pub fn new(config: TapConfig<H::Node>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: TapState::default(),
            revision: 0,
            handle: None,
            element_listeners: EventKinds::empty(),
            global_listeners: EventKinds::empty(),
            touches: TouchList::new(),
            scroll: ScrollDetector::new(),
            deferred: DeferredQueue::new(),
            is_touch_active: false,
            is_pinching: false,
            should_prevent_focus: false,
            should_ignore_mouse_events: false,
            is_unmounted: false,
        })
    }

    /// Current tap state.
    pub fn state(&self) -> TapState {
        self.state
    }

    /// Bumped every time the published tap state changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Touch points of the active gesture.
    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    /// Current configuration.
    pub fn config(&self) -> &TapConfig<H::Node> {
        &self.config
    }

    /// The bound element, if any.
    pub fn element(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Mutable access to the bound element.
    pub fn element_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    /// Listener kinds currently held in `scope`.
    pub fn listeners(&self, scope: ListenerScope) -> EventKinds {
        match scope {
            ListenerScope::Element => self.element_listeners,
            ListenerScope::Global => self.global_listeners,
        }
    }

    /// Returns `true` while a touch gesture (tap or pinch) is active.
    pub fn is_touch_active(&self) -> bool {
        self.is_touch_active
    }

    /// Returns `true` while a two-finger pinch is active.
    pub fn is_pinching(&self) -> bool {
        self.is_pinching
    }

    /// Returns `true` once [`unmount`](Self::unmount) ran.
    pub fn is_unmounted(&self) -> bool {
        self.is_unmounted
    }

    /// Earliest pending deferred deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.deferred.next_deadline()
    }

    /// Replaces the configuration.
    ///
    /// Attributes are re-synchronized. Switching to disabled aborts any gesture
    /// in progress and resets the tap state without notifying.
    pub fn set_config(&mut self, config: TapConfig<H::Node>) -> Result<(), ConfigError> {
        config.validate()?;
        let was_disabled = self.config.is_disabled;
        self.config = config;
        if self.config.is_disabled && !was_disabled {
            log::debug!("disabled; aborting interaction");
            self.abort_gesture();
            self.publish(TapState::default());
        }
        self.sync_attributes();
        Ok(())
    }

    /// Binds to `handle`, returning whichever handle the machine no longer holds.
    ///
    /// Binding a handle with the same identity as the current one keeps the
    /// current binding and hands the new value back. A different identity moves
    /// every listener from the old element to the new one and reflects
    /// attributes onto it. After [`unmount`](Self::unmount) nothing binds.
    pub fn bind(&mut self, handle: H) -> Option<H> {
        if self.is_unmounted {
            log::debug!("ignoring bind of {:?} after unmount", handle.node());
            return Some(handle);
        }
        if self
            .handle
            .as_ref()
            .is_some_and(|current| current.node() == handle.node())
        {
            return Some(handle);
        }

        let global = self.global_listeners;
        let previous = self.detach();
        log::debug!(
            "binding {:?} (previous {:?})",
            handle.node(),
            previous.as_ref().map(ElementHandle::node)
        );
        self.handle = Some(handle);
        self.acquire(ListenerScope::Element, EventKinds::ELEMENT);
        self.acquire(ListenerScope::Global, global);
        self.sync_attributes();
        previous
    }

    /// Releases the element without ending the machine's lifetime.
    ///
    /// A press in progress cannot complete without listeners, so pressed and
    /// hovered are cleared without notifying. Pending deferred work is dropped.
    pub fn unbind(&mut self) -> Option<H> {
        let previous = self.detach();
        if previous.is_some() {
            self.deferred.clear();
            self.abort_gesture();
            let next = self.state.merge(TapStatePatch::pressed(false).with_hovered(false));
            self.publish(next);
        }
        previous
    }

    /// Ends the machine's lifetime.
    ///
    /// All listeners are released, the state is reset without notifying, and
    /// pending deferred work becomes a no-op.
    pub fn unmount(&mut self) -> Option<H> {
        let previous = self.detach();
        log::debug!(
            "unmounting {:?}",
            previous.as_ref().map(ElementHandle::node)
        );
        self.is_unmounted = true;
        self.deferred.clear();
        self.abort_gesture();
        self.publish(TapState::default());
        previous
    }

    /// Programmatically focuses the bound element if it is live.
    pub fn focus(&mut self) {
        if self.is_unmounted {
            return;
        }
        if let Some(handle) = self.handle.as_mut().filter(|h| h.is_connected()) {
            handle.focus();
        }
    }

    /// Feeds one input event that happened at `now` (milliseconds).
    pub fn handle(&mut self, event: &InputEvent<H::Node>, now: u64) -> Outcome {
        if self.is_unmounted || self.handle.is_none() {
            return Outcome::Continue;
        }
        let kind = event.kind();
        if !self.element_listeners.union(self.global_listeners).contains(kind) {
            log::trace!("no listener for {kind:?}; dropped");
            return Outcome::Continue;
        }
        if self.config.is_disabled {
            if kind == EventKinds::POINTER_UP {
                self.release(ListenerScope::Global, EventKinds::PRESS);
            }
            return Outcome::Continue;
        }

        match event {
            InputEvent::PointerEnter => self.on_pointer_hover(true, now),
            InputEvent::PointerLeave => self.on_pointer_hover(false, now),
            InputEvent::PointerDown { button, position } => {
                self.on_pointer_down(event, *button, *position, now);
            }
            InputEvent::PointerMove { position } => self.on_pointer_move(event, *position),
            InputEvent::PointerUp { target, .. } => self.on_pointer_up(event, *target, now),
            InputEvent::TouchStart { touches } => self.on_touch_start(event, touches, now),
            InputEvent::TouchMove { touches } => self.on_touch_move(event, touches, now),
            InputEvent::TouchEnd { touches } | InputEvent::TouchCancel { touches } => {
                self.on_touch_end(event, touches, now);
            }
            InputEvent::Focus => return self.on_focus(event, now),
            InputEvent::Blur => self.on_blur(event, now),
            InputEvent::KeyDown { key } => self.on_key_down(event, *key, now),
            InputEvent::Click { pointer_originated } => self.on_click(event, *pointer_originated),
            InputEvent::DragStart => self.on_drag_start(now),
        }
        Outcome::Continue
    }

    /// Runs deferred work due at `now`.
    pub fn run_deferred(&mut self, now: u64) {
        while let Some(task) = self.deferred.pop_due(now) {
            if self.is_unmounted || self.handle.is_none() {
                log::trace!("dropping {task:?}; no bound element");
                continue;
            }
            match task {
                Deferred::ReleaseKeyPress => {
                    if self.config.is_disabled {
                        self.publish(self.state.merge(TapStatePatch::pressed(false)));
                    } else {
                        self.set_tap_state(TapStatePatch::pressed(false), now);
                        self.emit_tap(TapPhase::End, None, false);
                    }
                }
                Deferred::ClearFocusSuppression => {
                    if !self.is_touch_active {
                        self.should_prevent_focus = false;
                    }
                }
            }
        }
    }

    fn on_pointer_hover(&mut self, hovered: bool, now: u64) {
        if self.should_ignore_mouse_events {
            return;
        }
        self.set_tap_state(TapStatePatch::hovered(hovered), now);
    }

    fn on_pointer_down(
        &mut self,
        event: &InputEvent<H::Node>,
        button: PointerButton,
        position: Point,
        now: u64,
    ) {
        if self.should_ignore_mouse_events {
            log::trace!("ignoring compatibility pointer down after touch");
            self.should_ignore_mouse_events = false;
            return;
        }
        if button != PointerButton::Primary {
            return;
        }
        self.acquire(ListenerScope::Global, EventKinds::PRESS);
        self.touches.clear();
        self.touches
            .push(TouchPoint::start(RawTouch::new(MOUSE_TOUCH_ID, position)));
        self.set_tap_state(TapStatePatch::pressed(true), now);
        self.emit_tap(TapPhase::Start, Some(event), true);
    }

    fn on_pointer_move(&mut self, event: &InputEvent<H::Node>, position: Point) {
        if !self.state.is_pressed || self.is_touch_active {
            return;
        }
        self.touches = track_touches(&[RawTouch::new(MOUSE_TOUCH_ID, position)], &self.touches);
        self.emit_tap(TapPhase::Move, Some(event), true);
    }

    fn on_pointer_up(&mut self, event: &InputEvent<H::Node>, target: Option<H::Node>, now: u64) {
        self.release(ListenerScope::Global, EventKinds::PRESS);
        let within = match (self.handle.as_ref(), target) {
            (Some(handle), Some(target)) => contains(handle, target),
            _ => false,
        };
        self.touches.clear();
        self.set_tap_state(TapStatePatch::pressed(false).with_hovered(within), now);
        self.emit_tap(TapPhase::End, Some(event), true);
    }

    fn on_touch_start(&mut self, event: &InputEvent<H::Node>, raw: &[RawTouch], now: u64) {
        self.touches = track_touches(raw, &self.touches);
        self.should_ignore_mouse_events = true;
        match self.touches.len() {
            1 => {
                self.is_touch_active = true;
                self.is_pinching = false;
                self.begin_scroll_tracking();
                self.set_tap_state(TapStatePatch::pressed(true).with_hovered(true), now);
                self.emit_tap(TapPhase::Start, Some(event), true);
            }
            2 if self.config.is_pinchable && !self.is_pinching => {
                let was_tapping = self.is_touch_active;
                self.is_touch_active = true;
                self.is_pinching = true;
                self.scroll.reset();
                self.set_tap_state(TapStatePatch::pressed(false).with_hovered(true), now);
                if was_tapping {
                    self.emit_tap(TapPhase::End, Some(event), true);
                }
                self.emit_pinch(PinchPhase::Start, event);
            }
            _ => {}
        }
    }

    fn on_touch_move(&mut self, event: &InputEvent<H::Node>, raw: &[RawTouch], now: u64) {
        self.touches = track_touches(raw, &self.touches);
        if self.is_pinching {
            self.emit_pinch(PinchPhase::Move, event);
            return;
        }
        // Cancelled by scrolling: the rest of the sequence is ignored.
        if !self.is_touch_active {
            return;
        }
        if self.has_scrolled() {
            log::trace!("scroll detected; cancelling tap");
            self.end_touch(event, now);
        } else {
            self.emit_tap(TapPhase::Move, Some(event), true);
        }
    }

    fn on_touch_end(&mut self, event: &InputEvent<H::Node>, raw: &[RawTouch], now: u64) {
        self.touches = track_touches(raw, &self.touches);
        match self.touches.len() {
            0 if self.is_touch_active => self.end_touch(event, now),
            1 if self.is_pinching => {
                self.is_pinching = false;
                self.begin_scroll_tracking();
                self.set_tap_state(TapStatePatch::pressed(true), now);
                self.emit_pinch(PinchPhase::End, event);
                self.emit_tap(TapPhase::Start, Some(event), true);
            }
            _ => {}
        }
    }

    fn end_touch(&mut self, event: &InputEvent<H::Node>, now: u64) {
        let was_pinching = self.is_pinching;
        self.is_touch_active = false;
        self.is_pinching = false;
        self.scroll.reset();
        self.set_tap_state(TapStatePatch::pressed(false).with_hovered(false), now);
        if was_pinching {
            self.emit_pinch(PinchPhase::End, event);
        } else {
            self.emit_tap(TapPhase::End, Some(event), true);
        }
        self.touches.clear();
    }

    fn on_focus(&mut self, event: &InputEvent<H::Node>, now: u64) -> Outcome {
        if !self.config.is_focusable || self.should_prevent_focus {
            log::trace!("focus suppressed");
            self.should_prevent_focus = false;
            return Outcome::Stop;
        }
        self.set_tap_state(TapStatePatch::focused(true), now);
        if let Some(cb) = self.config.callbacks.on_focus.as_mut() {
            cb(event);
        }
        Outcome::Continue
    }

    fn on_blur(&mut self, event: &InputEvent<H::Node>, now: u64) {
        self.set_tap_state(TapStatePatch::focused(false), now);
        if let Some(cb) = self.config.callbacks.on_blur.as_mut() {
            cb(event);
        }
    }

    fn on_key_down(&mut self, event: &InputEvent<H::Node>, key: Key, now: u64) {
        if !self.state.is_focused || key != Key::Enter {
            return;
        }
        self.set_tap_state(TapStatePatch::pressed(true), now);
        self.emit_tap(TapPhase::Start, Some(event), false);
        if let Some(cb) = self.config.callbacks.on_tap.as_mut() {
            cb(Some(event));
        }
        self.deferred
            .schedule(now, KEY_RELEASE_DELAY_MS, Deferred::ReleaseKeyPress);
    }

    fn on_click(&mut self, event: &InputEvent<H::Node>, pointer_originated: bool) {
        let native_keyboard_click = !pointer_originated
            && self
                .handle
                .as_ref()
                .is_some_and(ElementHandle::is_native_button);
        if native_keyboard_click {
            // Already reported by the Enter key path.
            return;
        }
        if let Some(cb) = self.config.callbacks.on_tap.as_mut() {
            cb(Some(event));
        }
    }

    fn on_drag_start(&mut self, now: u64) {
        self.abort_gesture();
        self.set_tap_state(TapStatePatch::pressed(false).with_hovered(false), now);
    }

    /// Shallow-merges `patch`, applies focus suppression, and publishes.
    fn set_tap_state(&mut self, patch: TapStatePatch, now: u64) {
        if patch.starts_press() && (self.config.prevent_focus_on_tap || self.is_touch_active) {
            self.should_prevent_focus = true;
            if !self.is_touch_active {
                self.deferred.schedule(
                    now,
                    FOCUS_SUPPRESSION_RESET_DELAY_MS,
                    Deferred::ClearFocusSuppression,
                );
            }
        }
        let next = self.state.merge(patch);
        if self.publish(next) && !self.config.is_disabled {
            if let Some(cb) = self.config.callbacks.on_change_tap_state.as_mut() {
                cb(next);
            }
        }
    }

    /// Stores `next`; returns `true` if it differs from the previous snapshot.
    fn publish(&mut self, next: TapState) -> bool {
        if next == self.state {
            return false;
        }
        log::trace!("tap state {:?} -> {:?}", self.state, next);
        self.state = next;
        self.revision += 1;
        true
    }

    fn abort_gesture(&mut self) {
        self.release(ListenerScope::Global, EventKinds::PRESS);
        self.touches.clear();
        self.scroll.reset();
        self.is_touch_active = false;
        self.is_pinching = false;
    }

    fn begin_scroll_tracking(&mut self) {
        if let Some(handle) = self.handle.as_ref() {
            self.scroll.begin_tracking(handle);
        }
    }

    fn has_scrolled(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| self.scroll.has_scrolled(handle))
    }

    fn emit_tap(&mut self, phase: TapPhase, event: Option<&InputEvent<H::Node>>, with_touches: bool) {
        if self.config.is_disabled {
            return;
        }
        let callbacks = &mut self.config.callbacks;
        let slot = match phase {
            TapPhase::Start => &mut callbacks.on_tap_start,
            TapPhase::Move => &mut callbacks.on_tap_move,
            TapPhase::End => &mut callbacks.on_tap_end,
        };
        if let Some(cb) = slot.as_mut() {
            let touches: &[TouchPoint] = if with_touches { &self.touches } else { &[] };
            cb(event, touches);
        }
    }

    fn emit_pinch(&mut self, phase: PinchPhase, event: &InputEvent<H::Node>) {
        if self.config.is_disabled {
            return;
        }
        let callbacks = &mut self.config.callbacks;
        let slot = match phase {
            PinchPhase::Start => &mut callbacks.on_pinch_start,
            PinchPhase::Move => &mut callbacks.on_pinch_move,
            PinchPhase::End => &mut callbacks.on_pinch_end,
        };
        if let Some(cb) = slot.as_mut() {
            cb(event, &self.touches);
        }
    }

    fn sync_attributes(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            sync_attributes(&self.config, handle);
        }
    }

    /// Registers every kind in `kinds` not already held in `scope`.
    fn acquire(&mut self, scope: ListenerScope, kinds: EventKinds) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        let held = match scope {
            ListenerScope::Element => &mut self.element_listeners,
            ListenerScope::Global => &mut self.global_listeners,
        };
        for kind in kinds.difference(*held).iter() {
            handle.add_listener(scope, kind);
        }
        held.insert(kinds);
    }

    /// Releases every kind in `kinds` currently held in `scope`.
    fn release(&mut self, scope: ListenerScope, kinds: EventKinds) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        let held = match scope {
            ListenerScope::Element => &mut self.element_listeners,
            ListenerScope::Global => &mut self.global_listeners,
        };
        for kind in kinds.intersection(*held).iter() {
            handle.remove_listener(scope, kind);
        }
        held.remove(kinds);
    }

    /// Releases all listeners and takes the handle.
    fn detach(&mut self) -> Option<H> {
        self.release(ListenerScope::Element, EventKinds::all());
        self.release(ListenerScope::Global, EventKinds::all());
        self.handle.take()
    }
}
