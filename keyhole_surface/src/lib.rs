// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyhole Surface: the drawing-surface boundary of the Keyhole previewer.
//!
//! The previewer draws through a small trait rather than a concrete
//! renderer, so the same widget logic can target a web canvas, a CPU
//! rasterizer, or a recording backend in tests. The trait is deliberately
//! close to the primitives an immediate-mode 2D context provides:
//!
//! - **Resources**: images are installed once and addressed through an
//!   opaque [`ImageId`] handle whose lifetime is managed via
//!   [`SurfaceResources`].
//! - **Drawing**: [`Surface`] exposes clearing, path fill/stroke, and
//!   source-rect-to-destination-rect image blits.
//!
//! The geometry and paint vocabulary comes straight from the ecosystem:
//! paths and rectangles are [`kurbo`] types, colors and fill rules are
//! [`peniko`] types.
//!
//! Raster *encoding* is intentionally not part of this trait. Exporting a
//! crop operates on the decoded source pixels at the widget layer; the
//! on-screen surface only ever draws.
//!
//! # Example
//!
//! A minimal sketch of how a backend is driven:
//!
//! ```ignore
//! # use keyhole_surface::*;
//! # use kurbo::{BezPath, Rect};
//! # struct MyBackend { /* implements SurfaceResources + Surface */ }
//! let mut surface = MyBackend { /* ... */ };
//!
//! let image = surface.create_image(ImageDesc { width: 2, height: 2 }, &[0; 16]);
//! surface.clear(Rect::new(0.0, 0.0, 800.0, 600.0));
//! surface.draw_image_rect(
//!     image,
//!     Rect::new(0.0, 0.0, 2.0, 2.0),
//!     Rect::new(0.0, 0.0, 800.0, 600.0),
//! );
//! surface.destroy_image(image);
//! ```

#![no_std]

use kurbo::{BezPath, Rect};

pub use kurbo::Stroke as StrokeStyle;
pub use peniko::{Color, Fill as FillRule};

/// Identifier for an image resource.
///
/// This is a small, opaque handle that is stable for the lifetime of the
/// resource. Images are typically installed once per loaded source and
/// reused across frames until explicitly destroyed.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Description of an image resource.
///
/// Pixel data accompanying the descriptor is tightly packed, row-major
/// RGBA8 with straight alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageDesc {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Resource lifetime interface.
///
/// Backends implement this to manage their own image storage. IDs must
/// remain valid and refer to the same logical resource until the
/// corresponding [`SurfaceResources::destroy_image`] call; destroying an
/// unknown or already-destroyed ID must be tolerated.
pub trait SurfaceResources {
    /// Installs an image resource from raw RGBA8 pixels.
    fn create_image(&mut self, desc: ImageDesc, pixels: &[u8]) -> ImageId;
    /// Destroys a previously installed image.
    fn destroy_image(&mut self, id: ImageId);
}

/// Minimal 2D drawing surface.
///
/// Coordinates for `clear`, paths, and destination rectangles are in
/// effective viewport pixels; image source rectangles are in image pixel
/// space. Backends are free to batch or reorder internally as long as the
/// observable output matches the call order.
pub trait Surface: SurfaceResources {
    /// Clears the given rectangle to fully transparent.
    fn clear(&mut self, rect: Rect);

    /// Fills a path with a solid color under the given fill rule.
    fn fill_path(&mut self, path: &BezPath, fill_rule: FillRule, color: Color);

    /// Strokes a path with a solid color.
    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle, color: Color);

    /// Draws the `src` rectangle of an image into the `dst` rectangle,
    /// scaling as needed.
    fn draw_image_rect(&mut self, image: ImageId, src: Rect, dst: Rect);
}
