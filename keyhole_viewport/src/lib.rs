// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyhole Viewport: the transform engine behind the Keyhole image previewer.
//!
//! This crate provides small, headless models of a fixed-aspect viewport over
//! a source image. It focuses on:
//! - Computing the largest sub-rectangle of an image that matches a target
//!   aspect ratio ([`CropRegion::fit`]).
//! - Panning that sub-rectangle by pixel deltas while keeping it inside the
//!   image bounds ([`CropRegion::pan_by`]).
//! - Responsive scaling of the configured viewport to the width actually
//!   available in the host container ([`Viewport`]).
//! - Overlay geometry for the grid and circular vignette drawn on top of the
//!   preview ([`overlay`]).
//!
//! It does **not** own any pixel data or rendering backend. Callers are
//! expected to:
//! - Keep the decoded image themselves and hand this crate only its natural
//!   size.
//! - Derive draw calls from [`CropRegion::rect`] and the overlay helpers.
//! - Wire input events into [`CropRegion::pan_by`] at a higher layer.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use keyhole_viewport::CropRegion;
//!
//! // A wide 4000x2000 image shown through a square 800x800 viewport.
//! let natural = Size::new(4000.0, 2000.0);
//! let target = Size::new(800.0, 800.0);
//! let mut crop = CropRegion::fit(natural, target).unwrap();
//!
//! // The visible slice is the largest square inside the image, centered.
//! assert_eq!(crop.slice_size(), Size::new(2000.0, 2000.0));
//! assert_eq!(crop.offset().x, 1000.0);
//!
//! // Panning clamps at the image edge instead of failing.
//! crop.pan_by(Vec2::new(-1500.0, 0.0));
//! assert_eq!(crop.offset().x, 0.0);
//! ```
//!
//! ## Design notes
//!
//! - The slice size always preserves the target aspect ratio exactly;
//!   panning perturbs only the offset.
//! - Refitting (after a container resize or a target-dimension change)
//!   recenters the crop. Pan progress deliberately does not survive a refit.
//! - Responsive scaling is isotropic and capped at 1: the viewport shrinks
//!   to fit its container but never upscales past its configured size.
//!
//! This crate is `no_std`.

#![no_std]

mod crop;
mod viewport;

pub mod overlay;

pub use crop::{CropRegion, EmptySourceError};
pub use viewport::{Viewport, ViewportDebugInfo};
