// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures: an in-memory surface tree and a callback recorder.

#![allow(dead_code, reason = "not every test binary uses every fixture")]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Point, Size, Vec2};
use understory_tap::config::TapConfig;
use understory_tap::element::{Attribute, ElementHandle, EventKinds, ListenerScope};
use understory_tap::event::InputEvent;
use understory_tap::machine::TapMachine;
use understory_tap::scroll::ScrollMetrics;
use understory_tap::state::TapState;
use understory_tap::touch::RawTouch;

/// Host tree shared by every surface handle.
#[derive(Debug, Default)]
pub struct World {
    parents: HashMap<u32, u32>,
    metrics: HashMap<u32, ScrollMetrics>,
    attributes: HashMap<(u32, Attribute), String>,
    native_buttons: Vec<u32>,
    listeners: HashMap<(u32, ListenerScope), EventKinds>,
    /// Total `add_listener` calls.
    pub adds: usize,
    /// Total `remove_listener` calls.
    pub removes: usize,
    /// Total attribute writes and removals.
    pub attribute_mutations: usize,
    /// Nodes that received programmatic focus.
    pub focused: Vec<u32>,
}

/// Handle to one node of a shared [`World`].
#[derive(Clone, Debug)]
pub struct Surface {
    world: Rc<RefCell<World>>,
    node: u32,
}

/// Builds worlds node by node.
#[derive(Clone, Debug, Default)]
pub struct Host {
    pub world: Rc<RefCell<World>>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` under `parent`.
    pub fn node(&self, node: u32, parent: Option<u32>) -> &Self {
        if let Some(parent) = parent {
            self.world.borrow_mut().parents.insert(node, parent);
        }
        self
    }

    /// Makes `node` a vertical scroller.
    pub fn scroller(&self, node: u32) -> &Self {
        self.world.borrow_mut().metrics.insert(
            node,
            ScrollMetrics {
                content: Size::new(320.0, 2000.0),
                visible: Size::new(320.0, 480.0),
                offset: Vec2::ZERO,
            },
        );
        self
    }

    /// Marks `node` as a native button.
    pub fn native_button(&self, node: u32) -> &Self {
        self.world.borrow_mut().native_buttons.push(node);
        self
    }

    /// Scrolls `node` by `dy`.
    pub fn scroll_by(&self, node: u32, dy: f64) {
        let mut world = self.world.borrow_mut();
        let metrics = world.metrics.entry(node).or_default();
        metrics.offset.y += dy;
    }

    pub fn surface(&self, node: u32) -> Surface {
        Surface {
            world: self.world.clone(),
            node,
        }
    }

    /// Listener kinds currently registered for `node` in `scope`.
    pub fn listeners(&self, node: u32, scope: ListenerScope) -> EventKinds {
        self.world
            .borrow()
            .listeners
            .get(&(node, scope))
            .copied()
            .unwrap_or_default()
    }

    pub fn attribute(&self, node: u32, attribute: Attribute) -> Option<String> {
        self.world
            .borrow()
            .attributes
            .get(&(node, attribute))
            .cloned()
    }

    pub fn adds(&self) -> usize {
        self.world.borrow().adds
    }

    pub fn removes(&self) -> usize {
        self.world.borrow().removes
    }

    pub fn attribute_mutations(&self) -> usize {
        self.world.borrow().attribute_mutations
    }

    pub fn focused(&self) -> Vec<u32> {
        self.world.borrow().focused.clone()
    }
}

impl ElementHandle for Surface {
    type Node = u32;

    fn node(&self) -> u32 {
        self.node
    }

    fn parent(&self, node: u32) -> Option<u32> {
        self.world.borrow().parents.get(&node).copied()
    }

    fn scroll_metrics(&self, node: u32) -> ScrollMetrics {
        self.world
            .borrow()
            .metrics
            .get(&node)
            .copied()
            .unwrap_or_default()
    }

    fn add_listener(&mut self, scope: ListenerScope, kind: EventKinds) {
        let mut world = self.world.borrow_mut();
        world.adds += 1;
        let held = world.listeners.entry((self.node, scope)).or_default();
        assert!(!held.contains(kind), "{kind:?} registered twice on {}", self.node);
        held.insert(kind);
    }

    fn remove_listener(&mut self, scope: ListenerScope, kind: EventKinds) {
        let mut world = self.world.borrow_mut();
        world.removes += 1;
        let held = world.listeners.entry((self.node, scope)).or_default();
        assert!(held.contains(kind), "{kind:?} released but not held on {}", self.node);
        held.remove(kind);
    }

    fn attribute(&self, attribute: Attribute) -> Option<String> {
        self.world
            .borrow()
            .attributes
            .get(&(self.node, attribute))
            .cloned()
    }

    fn set_attribute(&mut self, attribute: Attribute, value: &str) {
        let mut world = self.world.borrow_mut();
        world.attribute_mutations += 1;
        world
            .attributes
            .insert((self.node, attribute), value.to_string());
    }

    fn remove_attribute(&mut self, attribute: Attribute) {
        let mut world = self.world.borrow_mut();
        world.attribute_mutations += 1;
        world.attributes.remove(&(self.node, attribute));
    }

    fn focus(&mut self) {
        let node = self.node;
        self.world.borrow_mut().focused.push(node);
    }

    fn is_native_button(&self) -> bool {
        self.world.borrow().native_buttons.contains(&self.node)
    }
}

/// One outward callback invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Tap,
    TapStart { touches: usize, pressed: bool },
    TapMove { touches: usize, delta: Option<Vec2> },
    TapEnd { touches: usize, pressed: bool },
    PinchStart { touches: usize },
    PinchMove { touches: usize },
    PinchEnd { touches: usize },
    Focus,
    Blur,
}

/// Records callbacks and the last published tap state.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    states: Rc<RefCell<Vec<TapState>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn states(&self) -> Vec<TapState> {
        self.states.borrow().clone()
    }

    fn last_pressed(&self) -> bool {
        self.states.borrow().last().is_some_and(|s| s.is_pressed)
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    /// `config` with every callback slot recording into `self`.
    pub fn wire(&self, config: TapConfig<u32>) -> TapConfig<u32> {
        let (tap, start) = (self.clone(), self.clone());
        let (moved, end) = (self.clone(), self.clone());
        let (pinch_start, pinch_move, pinch_end) = (self.clone(), self.clone(), self.clone());
        let (focus, blur, state) = (self.clone(), self.clone(), self.clone());
        config
            .on_tap(move |_| tap.push(Call::Tap))
            .on_tap_start(move |_, touches| {
                let pressed = start.last_pressed();
                start.push(Call::TapStart {
                    touches: touches.len(),
                    pressed,
                });
            })
            .on_tap_move(move |_, touches| {
                moved.push(Call::TapMove {
                    touches: touches.len(),
                    delta: touches.first().map(|p| p.delta),
                });
            })
            .on_tap_end(move |_, touches| {
                let pressed = end.last_pressed();
                end.push(Call::TapEnd {
                    touches: touches.len(),
                    pressed,
                });
            })
            .on_pinch_start(move |_, touches| {
                pinch_start.push(Call::PinchStart {
                    touches: touches.len(),
                });
            })
            .on_pinch_move(move |_, touches| {
                pinch_move.push(Call::PinchMove {
                    touches: touches.len(),
                });
            })
            .on_pinch_end(move |_, touches| {
                pinch_end.push(Call::PinchEnd {
                    touches: touches.len(),
                });
            })
            .on_focus(move |_| focus.push(Call::Focus))
            .on_blur(move |_| blur.push(Call::Blur))
            .on_change_tap_state(move |s| state.states.borrow_mut().push(s))
    }
}

pub fn touch(id: u64, x: f64, y: f64) -> RawTouch {
    RawTouch::new(id, Point::new(x, y))
}

pub fn pointer_up(x: f64, y: f64, target: Option<u32>) -> InputEvent<u32> {
    InputEvent::PointerUp {
        position: Point::new(x, y),
        target,
    }
}

/// A machine recording into `recorder`, bound to `node` of `host`.
pub fn bound(
    host: &Host,
    node: u32,
    recorder: &Recorder,
    config: TapConfig<u32>,
) -> TapMachine<Surface> {
    let mut machine = TapMachine::new(recorder.wire(config)).expect("valid configuration");
    machine.bind(host.surface(node));
    machine
}
