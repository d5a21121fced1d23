// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny host surface tree shared by the tap demos.
//!
//! Nodes are named, may scroll, and print every listener and attribute change
//! so the demos show what a real host would be asked to do.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Size, Vec2};
use understory_tap::element::{Attribute, ElementHandle, EventKinds, ListenerScope};
use understory_tap::scroll::ScrollMetrics;

#[derive(Debug, Default)]
struct NodeData {
    name: &'static str,
    parent: Option<u32>,
    metrics: ScrollMetrics,
    attributes: HashMap<Attribute, String>,
}

/// A shared scene of named nodes.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Rc<RefCell<HashMap<u32, NodeData>>>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node named `name` under `parent`.
    pub fn add(&self, id: u32, name: &'static str, parent: Option<u32>) {
        self.nodes.borrow_mut().insert(
            id,
            NodeData {
                name,
                parent,
                ..NodeData::default()
            },
        );
    }

    /// Adds a vertically scrollable node.
    pub fn add_scroller(&self, id: u32, name: &'static str, parent: Option<u32>) {
        self.add(id, name, parent);
        if let Some(node) = self.nodes.borrow_mut().get_mut(&id) {
            node.metrics = ScrollMetrics {
                content: Size::new(400.0, 3000.0),
                visible: Size::new(400.0, 600.0),
                offset: Vec2::ZERO,
            };
        }
    }

    /// Scrolls `id` by `dy`.
    pub fn scroll(&self, id: u32, dy: f64) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(&id) {
            node.metrics.offset.y += dy;
            println!("  [host] {} scrolled to {}", node.name, node.metrics.offset.y);
        }
    }

    /// A handle to the node `id`.
    pub fn surface(&self, id: u32) -> SceneSurface {
        SceneSurface {
            scene: self.clone(),
            id,
        }
    }

    fn name(&self, id: u32) -> &'static str {
        self.nodes.borrow().get(&id).map_or("?", |node| node.name)
    }
}

/// Handle to one node of a [`Scene`].
#[derive(Clone, Debug)]
pub struct SceneSurface {
    scene: Scene,
    id: u32,
}

impl ElementHandle for SceneSurface {
    type Node = u32;

    fn node(&self) -> u32 {
        self.id
    }

    fn parent(&self, node: u32) -> Option<u32> {
        self.scene.nodes.borrow().get(&node).and_then(|n| n.parent)
    }

    fn scroll_metrics(&self, node: u32) -> ScrollMetrics {
        self.scene
            .nodes
            .borrow()
            .get(&node)
            .map(|n| n.metrics)
            .unwrap_or_default()
    }

    fn add_listener(&mut self, scope: ListenerScope, kind: EventKinds) {
        log::info!("{}: +{scope:?} {kind:?}", self.scene.name(self.id));
    }

    fn remove_listener(&mut self, scope: ListenerScope, kind: EventKinds) {
        log::info!("{}: -{scope:?} {kind:?}", self.scene.name(self.id));
    }

    fn attribute(&self, attribute: Attribute) -> Option<String> {
        self.scene
            .nodes
            .borrow()
            .get(&self.id)
            .and_then(|n| n.attributes.get(&attribute).cloned())
    }

    fn set_attribute(&mut self, attribute: Attribute, value: &str) {
        let mut nodes = self.scene.nodes.borrow_mut();
        if let Some(node) = nodes.get_mut(&self.id) {
            println!("  [host] {} {attribute}=\"{value}\"", node.name);
            node.attributes.insert(attribute, value.to_string());
        }
    }

    fn remove_attribute(&mut self, attribute: Attribute) {
        let mut nodes = self.scene.nodes.borrow_mut();
        if let Some(node) = nodes.get_mut(&self.id) {
            println!("  [host] {} removed {attribute}", node.name);
            node.attributes.remove(&attribute);
        }
    }

    fn focus(&mut self) {
        println!("  [host] focus {}", self.scene.name(self.id));
    }
}

/// Installs `env_logger` when built with the `logging` feature.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
