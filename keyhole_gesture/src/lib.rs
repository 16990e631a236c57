// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyhole Gesture: drag state machines for the Keyhole previewer.
//!
//! This crate provides small, focused state machines that turn raw pointer
//! positions into pan deltas:
//!
//! - [`pan::PanGesture`]: anchored dragging for a single pointer (mouse).
//! - [`touch::TouchPan`]: the same state machine gated on one tracked touch
//!   identifier, so a second finger never disturbs an active pan.
//!
//! ## Delta convention
//!
//! Deltas are reported as `anchor - position`: dragging the pointer to the
//! right yields a negative X delta. Applying that delta to a crop offset
//! moves the crop window *against* the drag, which makes the visible content
//! follow the pointer — the direct-manipulation convention.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use keyhole_gesture::pan::PanGesture;
//!
//! let mut pan = PanGesture::default();
//!
//! pan.begin(Point::new(10.0, 20.0));
//! assert!(pan.is_active());
//!
//! // Pointer moves right and down; the content delta points left and up.
//! let delta = pan.update(Point::new(15.0, 26.0)).unwrap();
//! assert_eq!(delta.x, -5.0);
//! assert_eq!(delta.y, -6.0);
//!
//! pan.finish();
//! assert!(!pan.is_active());
//! ```
//!
//! The crate does not assume any particular event source. Callers convert
//! raw pointer or touch coordinates to viewport-local pixels, feed them in,
//! and apply the returned deltas to whatever they are panning.
//!
//! This crate is `no_std`.

#![no_std]

pub mod pan;
pub mod touch;
