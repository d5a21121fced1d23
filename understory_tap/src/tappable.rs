// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glue for a rendering collaborator: a machine, its content, and ref consumers.
//!
//! A renderer keeps one [`Tappable`] per interactive element. On every frame it
//! compares [`Tappable::revision`] with the revision it last drew and, when it
//! changed, calls [`Tappable::render`]. When the concrete surface is created or
//! replaced it calls [`Tappable::attach`].

use crate::config::{ConfigError, TapConfig};
use crate::content::Content;
use crate::element::ElementHandle;
use crate::event::{InputEvent, Outcome};
use crate::machine::TapMachine;
use crate::refs::{MergedRef, RefTarget};
use crate::state::TapState;

/// Builder for [`Tappable`].
#[derive(Debug)]
pub struct TappableBuilder<H: ElementHandle, T> {
    config: TapConfig<H::Node>,
    content: Option<Content<T>>,
    refs: MergedRef<H>,
}

impl<H: ElementHandle, T> Default for TappableBuilder<H, T> {
    fn default() -> Self {
        Self {
            config: TapConfig::default(),
            content: None,
            refs: MergedRef::new(),
        }
    }
}

impl<H: ElementHandle, T> TappableBuilder<H, T> {
    /// Starts with the default configuration and no content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: TapConfig<H::Node>) -> Self {
        self.config = config;
        self
    }

    /// Sets the content.
    #[must_use]
    pub fn content(mut self, content: Content<T>) -> Self {
        self.content = Some(content);
        self
    }

    /// Adds a consumer of the bound handle.
    #[must_use]
    pub fn with_ref(mut self, target: impl RefTarget<H> + 'static) -> Self {
        self.refs.push(target);
        self
    }

    /// Validates and builds.
    pub fn build(self) -> Result<Tappable<H, T>, ConfigError> {
        let content = self.content.ok_or(ConfigError::MissingContent)?;
        Ok(Tappable {
            machine: TapMachine::new(self.config)?,
            content,
            refs: self.refs,
        })
    }
}

/// An interactive element as seen by its renderer.
#[derive(Debug)]
pub struct Tappable<H: ElementHandle, T> {
    machine: TapMachine<H>,
    content: Content<T>,
    refs: MergedRef<H>,
}

impl<H: ElementHandle, T> Tappable<H, T> {
    /// Starts a builder.
    pub fn builder() -> TappableBuilder<H, T> {
        TappableBuilder::new()
    }

    /// The underlying state machine.
    pub fn machine(&self) -> &TapMachine<H> {
        &self.machine
    }

    /// Mutable access to the state machine.
    pub fn machine_mut(&mut self) -> &mut TapMachine<H> {
        &mut self.machine
    }

    /// Current tap state.
    pub fn state(&self) -> TapState {
        self.machine.state()
    }

    /// Revision of the tap state; re-render when it changes.
    pub fn revision(&self) -> u64 {
        self.machine.revision()
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: TapConfig<H::Node>) -> Result<(), ConfigError> {
        self.machine.set_config(config)
    }

    /// Replaces the content.
    pub fn set_content(&mut self, content: Content<T>) {
        self.content = content;
    }

    /// Binds a (possibly new) surface and tells every ref consumer.
    ///
    /// Refs only change when the machine actually takes the surface: not after
    /// [`unmount`](Self::unmount), and not for the surface already bound.
    /// Returns the handle the machine no longer holds.
    pub fn attach(&mut self, handle: H) -> Option<H> {
        let takes = !self.machine.is_unmounted()
            && self
                .machine
                .element()
                .is_none_or(|current| current.node() != handle.node());
        if takes {
            self.refs.assign(Some(&handle));
        }
        self.machine.bind(handle)
    }

    /// Ends the element's lifetime and clears every ref consumer.
    pub fn unmount(&mut self) -> Option<H> {
        self.refs.assign(None);
        self.machine.unmount()
    }

    /// Feeds an input event.
    pub fn handle(&mut self, event: &InputEvent<H::Node>, now: u64) -> Outcome {
        self.machine.handle(event, now)
    }

    /// Runs deferred work due at `now`.
    pub fn run_deferred(&mut self, now: u64) {
        self.machine.run_deferred(now);
    }

    /// Programmatically focuses the bound surface.
    pub fn focus(&mut self) {
        self.machine.focus();
    }
}

impl<H: ElementHandle, T: Clone> Tappable<H, T> {
    /// Resolves the content for the current tap state.
    pub fn render(&self) -> T {
        self.content.resolve(self.machine.state())
    }
}
