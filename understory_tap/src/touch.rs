// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch point tracking: turn raw touch snapshots into stable per-finger records.
//!
//! ## Usage
//!
//! 1) On every touch event, collect the currently active touches as [`RawTouch`] values,
//!    in the order the platform reports them.
//! 2) Call [`track_touches`] with that list and the previous [`TouchList`].
//! 3) Keep the returned list for the next event. Clear it when the gesture ends so that a
//!    reused identifier starts over with a fresh origin.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_tap::touch::{RawTouch, TouchList, track_touches};
//!
//! let down = track_touches(&[RawTouch::new(7, Point::new(10.0, 20.0))], &TouchList::new());
//! assert_eq!(down[0].delta, Vec2::ZERO);
//!
//! let moved = track_touches(&[RawTouch::new(7, Point::new(15.0, 18.0))], &down);
//! assert_eq!(moved[0].origin, Point::new(10.0, 20.0));
//! assert_eq!(moved[0].delta, Vec2::new(5.0, -2.0));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Identifier of the single synthetic point used for mouse presses.
pub const MOUSE_TOUCH_ID: u64 = 0;

/// A touch as reported by the platform for one event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawTouch {
    /// Platform identifier, stable for the lifetime of one finger contact.
    pub id: u64,
    /// Current position.
    pub position: Point,
}

impl RawTouch {
    /// Creates a raw touch.
    pub fn new(id: u64, position: Point) -> Self {
        Self { id, position }
    }
}

/// One tracked finger within a gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Platform identifier.
    pub id: u64,
    /// Current position.
    pub position: Point,
    /// Position when this identifier first appeared in the gesture.
    pub origin: Point,
    /// `position - origin`.
    pub delta: Vec2,
}

impl TouchPoint {
    /// Starts tracking a new point; origin is the current position.
    pub fn start(raw: RawTouch) -> Self {
        Self {
            id: raw.id,
            position: raw.position,
            origin: raw.position,
            delta: Vec2::ZERO,
        }
    }

    /// Moves this point, keeping its origin.
    #[must_use]
    pub fn moved_to(self, position: Point) -> Self {
        Self {
            position,
            delta: position - self.origin,
            ..self
        }
    }
}

/// Ordered touch points; most gestures have at most two.
pub type TouchList = SmallVec<[TouchPoint; 2]>;

/// Produces the touch list for the current event.
///
/// The result has one entry per raw touch, in raw order. Identifiers found in
/// `previous` keep their origin; new identifiers start at their current position.
/// Identifiers missing from `raw` are dropped.
pub fn track_touches(raw: &[RawTouch], previous: &[TouchPoint]) -> TouchList {
    raw.iter()
        .map(|touch| match previous.iter().find(|p| p.id == touch.id) {
            Some(prev) => prev.moved_to(touch.position),
            None => TouchPoint::start(*touch),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: u64, x: f64, y: f64) -> RawTouch {
        RawTouch::new(id, Point::new(x, y))
    }

    #[test]
    fn new_identifier_starts_at_origin() {
        let list = track_touches(&[raw(1, 3.0, 4.0)], &[]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].origin, Point::new(3.0, 4.0));
        assert_eq!(list[0].position, list[0].origin);
        assert_eq!(list[0].delta, Vec2::ZERO);
    }

    #[test]
    fn known_identifier_keeps_origin() {
        let first = track_touches(&[raw(1, 0.0, 0.0)], &[]);
        let second = track_touches(&[raw(1, 5.0, 3.0)], &first);
        let third = track_touches(&[raw(1, 8.0, 7.0)], &second);

        assert_eq!(third[0].origin, Point::new(0.0, 0.0));
        assert_eq!(third[0].delta, Vec2::new(8.0, 7.0));
    }

    #[test]
    fn second_finger_gets_its_own_origin() {
        let one = track_touches(&[raw(1, 0.0, 0.0)], &[]);
        let two = track_touches(&[raw(1, 2.0, 0.0), raw(2, 50.0, 50.0)], &one);

        assert_eq!(two.len(), 2);
        assert_eq!(two[0].delta, Vec2::new(2.0, 0.0));
        assert_eq!(two[1].origin, Point::new(50.0, 50.0));
        assert_eq!(two[1].delta, Vec2::ZERO);
    }

    #[test]
    fn lifted_finger_is_dropped_and_order_follows_raw() {
        let two = track_touches(&[raw(1, 0.0, 0.0), raw(2, 10.0, 10.0)], &[]);
        let one = track_touches(&[raw(2, 12.0, 9.0)], &two);

        assert_eq!(one.len(), 1);
        assert_eq!(one[0].id, 2);
        assert_eq!(one[0].delta, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn reused_identifier_after_reset_gets_fresh_origin() {
        let first = track_touches(&[raw(3, 0.0, 0.0)], &[]);
        let _moved = track_touches(&[raw(3, 9.0, 9.0)], &first);

        // Gesture ended, list cleared by the caller.
        let again = track_touches(&[raw(3, 40.0, 40.0)], &TouchList::new());
        assert_eq!(again[0].origin, Point::new(40.0, 40.0));
        assert_eq!(again[0].delta, Vec2::ZERO);
    }

    #[test]
    fn empty_raw_clears_everything() {
        let list = track_touches(&[raw(1, 0.0, 0.0)], &[]);
        assert!(track_touches(&[], &list).is_empty());
    }

    #[test]
    fn negative_deltas() {
        let first = track_touches(&[raw(1, 100.0, 100.0)], &[]);
        let moved = track_touches(&[raw(1, 90.0, 85.0)], &first);
        assert_eq!(moved[0].delta, Vec2::new(-10.0, -15.0));
    }
}
