// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll interference detection for touch gestures.
//!
//! A finger that starts on a button and then scrolls its container should not
//! count as a press-drag. At touch start, [`ScrollDetector::begin_tracking`]
//! records every scrollable ancestor (content larger than its visible box) and
//! the summed scroll offset over them. During the gesture,
//! [`ScrollDetector::has_scrolled`] re-sums the same ancestors and reports any
//! change in either axis.
//!
//! The baseline is only valid for the gesture it was taken for; start tracking
//! again on every new touch gesture.

use alloc::vec::Vec;

use kurbo::{Size, Vec2};

use crate::element::ElementHandle;

/// Geometry of one node relevant to scrolling.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Full extent of the node's content.
    pub content: Size,
    /// Extent of the visible box.
    pub visible: Size,
    /// Current scroll offset (`x` = left, `y` = top).
    pub offset: Vec2,
}

impl ScrollMetrics {
    /// Returns `true` if the content overflows the visible box on either axis.
    pub fn is_scrollable(&self) -> bool {
        self.content.height > self.visible.height || self.content.width > self.visible.width
    }
}

/// Baseline of scrollable ancestor offsets for the current touch gesture.
#[derive(Clone, Debug)]
pub struct ScrollDetector<N> {
    baseline: Vec2,
    ancestors: Vec<N>,
}

impl<N> Default for ScrollDetector<N> {
    fn default() -> Self {
        Self {
            baseline: Vec2::ZERO,
            ancestors: Vec::new(),
        }
    }
}

impl<N: Copy + Eq> ScrollDetector<N> {
    /// Creates a detector that tracks nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks from the bound element to the root and records scrollable ancestors.
    ///
    /// Replaces any previous baseline.
    pub fn begin_tracking<H>(&mut self, handle: &H)
    where
        H: ElementHandle<Node = N> + ?Sized,
    {
        self.ancestors.clear();
        self.baseline = Vec2::ZERO;
        let mut current = Some(handle.node());
        while let Some(node) = current {
            let metrics = handle.scroll_metrics(node);
            if metrics.is_scrollable() {
                self.ancestors.push(node);
                self.baseline += metrics.offset;
            }
            current = handle.parent(node);
        }
    }

    /// Returns `true` if the summed offset of the tracked ancestors changed.
    pub fn has_scrolled<H>(&self, handle: &H) -> bool
    where
        H: ElementHandle<Node = N> + ?Sized,
    {
        let current = self
            .ancestors
            .iter()
            .fold(Vec2::ZERO, |sum, &node| sum + handle.scroll_metrics(node).offset);
        current.x != self.baseline.x || current.y != self.baseline.y
    }

    /// Forgets the tracked ancestors.
    pub fn reset(&mut self) {
        self.ancestors.clear();
        self.baseline = Vec2::ZERO;
    }

    /// Scrollable ancestors recorded by the last [`begin_tracking`](Self::begin_tracking),
    /// innermost first.
    pub fn tracked(&self) -> &[N] {
        &self.ancestors
    }

    /// Summed offset recorded as baseline.
    pub fn baseline(&self) -> Vec2 {
        self.baseline
    }
}
