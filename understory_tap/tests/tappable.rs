// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The renderer-facing bundle of machine, content and refs.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{Host, Surface, pointer_up};
use kurbo::Point;
use understory_tap::config::{ConfigError, TapConfig};
use understory_tap::content::Content;
use understory_tap::element::ElementHandle;
use understory_tap::event::InputEvent;
use understory_tap::refs::{RefRejected, RefTarget, SharedRef};
use understory_tap::state::TapState;
use understory_tap::tappable::Tappable;

/// Counts assignments it receives.
struct Counting(Rc<Cell<usize>>);

impl RefTarget<Surface> for Counting {
    fn assign(&mut self, _: Option<&Surface>) -> Result<(), RefRejected> {
        self.0.set(self.0.get() + 1);
        Ok(())
    }
}

fn label(state: TapState) -> &'static str {
    match (state.is_pressed, state.is_hovered) {
        (true, _) => "pressed",
        (false, true) => "hovered",
        (false, false) => "idle",
    }
}

#[test]
fn content_is_required() {
    let err = Tappable::<Surface, &str>::builder().build().unwrap_err();
    assert_eq!(err, ConfigError::MissingContent);
}

#[test]
fn invalid_tab_index_fails_build() {
    let err = Tappable::<Surface, _>::builder()
        .content(Content::fixed("x"))
        .config(TapConfig::new().tab_index("next"))
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::InvalidTabIndex("next".into()));
}

#[test]
fn render_follows_revision() {
    let host = Host::new();
    host.node(1, None);
    let mut tappable: Tappable<Surface, &str> = Tappable::builder()
        .content(Content::render(label))
        .build()
        .unwrap();
    tappable.attach(host.surface(1));

    let drawn = tappable.revision();
    assert_eq!(tappable.render(), "idle");

    tappable.handle(&InputEvent::PointerEnter, 0);
    assert_ne!(tappable.revision(), drawn);
    assert_eq!(tappable.render(), "hovered");

    tappable.handle(&InputEvent::pointer_down(Point::new(2.0, 2.0)), 10);
    assert_eq!(tappable.render(), "pressed");

    tappable.handle(&pointer_up(2.0, 2.0, Some(1)), 60);
    assert_eq!(tappable.render(), "hovered");
}

#[test]
fn fixed_content_is_handed_through() {
    let host = Host::new();
    host.node(1, None);
    let mut tappable: Tappable<Surface, String> = Tappable::builder()
        .content(Content::fixed(String::from("Save")))
        .build()
        .unwrap();
    tappable.attach(host.surface(1));
    tappable.handle(&InputEvent::PointerEnter, 0);
    assert_eq!(tappable.render(), "Save");
}

#[test]
fn refs_see_attach_and_unmount() {
    let host = Host::new();
    host.node(1, None).node(2, None);
    let caller = SharedRef::<Surface>::new();
    let mut tappable: Tappable<Surface, ()> = Tappable::builder()
        .content(Content::fixed(()))
        .with_ref(caller.clone())
        .build()
        .unwrap();

    tappable.attach(host.surface(1));
    assert_eq!(caller.get().map(|s| s.node()), Some(1));

    tappable.attach(host.surface(2));
    assert_eq!(caller.get().map(|s| s.node()), Some(2));

    tappable.unmount();
    assert!(caller.get().is_none());
    assert!(tappable.machine().is_unmounted());
}

#[test]
fn focus_goes_through_the_machine() {
    let host = Host::new();
    host.node(1, None);
    let mut tappable: Tappable<Surface, u8> = Tappable::builder()
        .content(Content::fixed(0_u8))
        .build()
        .unwrap();
    tappable.focus();
    assert!(host.focused().is_empty());

    tappable.attach(host.surface(1));
    tappable.focus();
    assert_eq!(host.focused(), [1]);
}

#[test]
fn refs_untouched_when_surface_is_refused() {
    let host = Host::new();
    host.node(1, None);
    let caller = SharedRef::<Surface>::new();
    let mut tappable: Tappable<Surface, ()> = Tappable::builder()
        .content(Content::fixed(()))
        .with_ref(caller.clone())
        .build()
        .unwrap();

    tappable.attach(host.surface(1));
    tappable.unmount();

    let refused = tappable.attach(host.surface(1));
    assert_eq!(refused.map(|s| s.node()), Some(1));
    assert!(tappable.machine().element().is_none());
    assert!(caller.get().is_none());
}

#[test]
fn reattaching_same_surface_keeps_refs() {
    let host = Host::new();
    host.node(1, None);
    let assigned = Rc::new(Cell::new(0));
    let mut tappable: Tappable<Surface, ()> = Tappable::builder()
        .content(Content::fixed(()))
        .with_ref(Counting(assigned.clone()))
        .build()
        .unwrap();

    tappable.attach(host.surface(1));
    let returned = tappable.attach(host.surface(1));
    assert_eq!(returned.map(|s| s.node()), Some(1));
    assert_eq!(assigned.get(), 1);
    assert_eq!(tappable.machine().element().map(|s| s.node()), Some(1));
}
