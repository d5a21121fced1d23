// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch taps, scroll cancellation and pinches.
//!
//! A card inside a scrolling list: one tap, one tap that turns into a scroll,
//! and a pinch that hands back to a tap.
//!
//! Run:
//! - `cargo run -p understory_tap_demos --example touch_gestures`

use kurbo::Point;
use understory_tap::config::TapConfig;
use understory_tap::event::InputEvent;
use understory_tap::machine::TapMachine;
use understory_tap::touch::{RawTouch, TouchPoint};
use understory_tap_demos::{Scene, SceneSurface, init_logging};

fn finger(id: u64, x: f64, y: f64) -> RawTouch {
    RawTouch::new(id, Point::new(x, y))
}

fn describe(touches: &[TouchPoint]) -> String {
    touches
        .iter()
        .map(|t| format!("#{} d=({:.0}, {:.0})", t.id, t.delta.x, t.delta.y))
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() {
    init_logging();

    let scene = Scene::new();
    scene.add_scroller(1, "list", None);
    scene.add(2, "card", Some(1));

    let config = TapConfig::new()
        .pinchable(true)
        .on_tap_start(|_, t| println!("  tap start   [{}]", describe(t)))
        .on_tap_move(|_, t| println!("  tap move    [{}]", describe(t)))
        .on_tap_end(|_, t| println!("  tap end     [{}]", describe(t)))
        .on_pinch_start(|_, t| println!("  pinch start [{}]", describe(t)))
        .on_pinch_move(|_, t| println!("  pinch move  [{}]", describe(t)))
        .on_pinch_end(|_, t| println!("  pinch end   [{}]", describe(t)))
        .on_change_tap_state(|s| println!("  state       {s:?}"));

    let mut card = TapMachine::<SceneSurface>::new(config).expect("valid configuration");
    card.bind(scene.surface(2));

    println!("tap:");
    card.handle(&InputEvent::touch_start([finger(1, 50.0, 50.0)]), 0);
    card.handle(&InputEvent::touch_move([finger(1, 52.0, 51.0)]), 16);
    card.handle(&InputEvent::touch_end([]), 90);

    println!("tap that scrolls:");
    card.handle(&InputEvent::touch_start([finger(1, 50.0, 300.0)]), 1000);
    scene.scroll(1, 30.0);
    card.handle(&InputEvent::touch_move([finger(1, 50.0, 270.0)]), 1016);
    card.handle(&InputEvent::touch_move([finger(1, 50.0, 220.0)]), 1032);
    card.handle(&InputEvent::touch_end([]), 1100);

    println!("pinch:");
    card.handle(&InputEvent::touch_start([finger(1, 40.0, 40.0)]), 2000);
    card.handle(
        &InputEvent::touch_start([finger(1, 40.0, 40.0), finger(2, 80.0, 80.0)]),
        2020,
    );
    card.handle(
        &InputEvent::touch_move([finger(1, 30.0, 30.0), finger(2, 95.0, 95.0)]),
        2040,
    );
    card.handle(&InputEvent::touch_end([finger(1, 30.0, 30.0)]), 2060);
    card.handle(&InputEvent::touch_end([]), 2100);

    // The platform's compatibility mouse press after the touch is swallowed.
    card.handle(&InputEvent::pointer_down(Point::new(30.0, 30.0)), 2110);
    println!("after compatibility mouse down: {:?}", card.state());

    card.unmount();
}
