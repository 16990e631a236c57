// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-touch pan: a [`PanGesture`] gated on one tracked touch identifier.
//!
//! Touch events deliver a list of active touches. `TouchPan` latches onto
//! the first touch it sees and from then on only positions carrying that
//! identifier drive the pan; additional fingers are ignored until the
//! gesture ends. `end` and `cancel` both reset the tracker.

use kurbo::{Point, Vec2};

use crate::pan::PanGesture;

/// One active touch as reported by the input adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Platform identifier for this touch, stable for its lifetime.
    pub id: u64,
    /// Position in viewport-local pixels.
    pub position: Point,
}

impl TouchPoint {
    /// Creates a touch point.
    #[must_use]
    pub fn new(id: u64, position: Point) -> Self {
        Self { id, position }
    }
}

/// Tracks a pan driven by a single touch out of a multi-touch stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchPan {
    tracked: Option<u64>,
    pan: PanGesture,
}

impl TouchPan {
    /// Starts tracking from a touch-start event.
    ///
    /// Latches the first touch in the list. If a touch is already being
    /// tracked this is a no-op, so a second finger cannot steal an active
    /// gesture.
    pub fn begin(&mut self, touches: &[TouchPoint]) {
        if self.tracked.is_some() {
            return;
        }
        if let Some(first) = touches.first() {
            self.tracked = Some(first.id);
            self.pan.begin(first.position);
        }
    }

    /// Feeds a touch-move event, returning the content delta for the
    /// tracked touch.
    ///
    /// The list is searched for the tracked identifier; every other touch
    /// is ignored. Returns `None` when no touch is tracked or the tracked
    /// touch is absent from the list.
    pub fn update(&mut self, touches: &[TouchPoint]) -> Option<Vec2> {
        let id = self.tracked?;
        let touch = touches.iter().find(|t| t.id == id)?;
        self.pan.update(touch.position)
    }

    /// Ends the gesture, clearing the tracked identifier and anchor.
    ///
    /// Used for both touch-end and touch-cancel; the two are
    /// indistinguishable as far as the pan is concerned.
    pub fn cancel(&mut self) {
        self.tracked = None;
        self.pan.finish();
    }

    /// Returns `true` while a touch is being tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tracked.is_some()
    }

    /// Returns the tracked touch identifier, if any.
    #[must_use]
    pub fn tracked_id(&self) -> Option<u64> {
        self.tracked
    }
}
