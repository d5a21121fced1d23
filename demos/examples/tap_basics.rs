// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap state basics.
//!
//! Drive a button with the mouse and the keyboard and print each tap state
//! the renderer would draw.
//!
//! Run:
//! - `cargo run -p understory_tap_demos --example tap_basics`
//! - `RUST_LOG=understory_tap=trace cargo run -p understory_tap_demos --features logging --example tap_basics`

use kurbo::Point;
use understory_tap::config::TapConfig;
use understory_tap::content::Content;
use understory_tap::event::{InputEvent, Key};
use understory_tap::state::TapState;
use understory_tap::tappable::Tappable;
use understory_tap_demos::{Scene, SceneSurface, init_logging};

fn label(state: TapState) -> String {
    let mut flags = Vec::new();
    if state.is_hovered {
        flags.push("hovered");
    }
    if state.is_pressed {
        flags.push("pressed");
    }
    if state.is_focused {
        flags.push("focused");
    }
    format!("[ Save ] {}", flags.join(" "))
}

fn main() {
    init_logging();

    let scene = Scene::new();
    scene.add(1, "toolbar", None);
    scene.add(2, "save", Some(1));
    scene.add(3, "save-icon", Some(2));

    let config = TapConfig::new()
        .tab_index(1)
        .on_tap(|_| println!("  on_tap"))
        .on_tap_start(|_, touches| {
            println!("  on_tap_start with {} point(s)", touches.len());
        })
        .on_tap_end(|_, _| println!("  on_tap_end"))
        .on_focus(|_| println!("  on_focus"));

    let mut button: Tappable<SceneSurface, String> = Tappable::builder()
        .config(config)
        .content(Content::render(label))
        .build()
        .expect("valid configuration");
    button.attach(scene.surface(2));

    let mut drawn = button.revision();
    let mut frame = |button: &Tappable<SceneSurface, String>, step: &str| {
        if button.revision() != drawn {
            drawn = button.revision();
            println!("{step:>24}: {}", button.render());
        } else {
            println!("{step:>24}: (no redraw)");
        }
    };

    let at = Point::new(12.0, 8.0);
    button.handle(&InputEvent::PointerEnter, 0);
    frame(&button, "pointer enter");

    button.handle(&InputEvent::pointer_down(at), 100);
    frame(&button, "pointer down");

    // The press suppresses the focus that follows it.
    let outcome = button.handle(&InputEvent::Focus, 100);
    println!("{:>24}: {outcome:?}", "focus after press");
    button.run_deferred(100);

    button.handle(
        &InputEvent::PointerUp {
            position: at,
            target: Some(3),
        },
        180,
    );
    frame(&button, "pointer up on icon");

    button.handle(&InputEvent::PointerLeave, 400);
    frame(&button, "pointer leave");

    // Tab into the button and press Enter.
    button.handle(&InputEvent::Focus, 1000);
    frame(&button, "tab focus");

    button.handle(&InputEvent::KeyDown { key: Key::Enter }, 1200);
    frame(&button, "enter");

    button.run_deferred(1200);
    let deadline = button.machine().next_deadline();
    println!("{:>24}: {deadline:?}", "next deadline");

    button.run_deferred(1350);
    frame(&button, "150ms later");

    button.handle(&InputEvent::Blur, 2000);
    frame(&button, "blur");

    button.unmount();
}
