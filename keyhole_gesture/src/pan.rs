// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored pan gesture: compute content deltas from pointer positions.
//!
//! 1) Call [`PanGesture::begin`] with the position where the pointer went
//!    down.
//! 2) On each move event, call [`PanGesture::update`] to get the content
//!    delta since the previous event. The anchor advances to the new
//!    position, so deltas are per-event, not cumulative.
//! 3) Call [`PanGesture::finish`] on release (or when the pointer leaves the
//!    widget, which callers treat as an implicit release).

use kurbo::{Point, Vec2};

/// Tracks one pointer drag and converts positions into pan deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanGesture {
    anchor: Option<Point>,
}

impl PanGesture {
    /// Starts a drag at the given position.
    ///
    /// Beginning while already active re-anchors at the new position.
    pub fn begin(&mut self, pos: Point) {
        self.anchor = Some(pos);
    }

    /// Feeds a new pointer position, returning the content delta since the
    /// last event.
    ///
    /// The delta is `anchor - pos` (see the crate docs for the sign
    /// convention) and the anchor moves to `pos`. Returns `None` when no
    /// drag is active, so move events outside a drag are free to ignore.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let anchor = self.anchor?;
        self.anchor = Some(pos);
        Some(anchor - pos)
    }

    /// Ends the drag and clears the anchor.
    pub fn finish(&mut self) {
        self.anchor = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Returns the current anchor position, if a drag is active.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }
}
