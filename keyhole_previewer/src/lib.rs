// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyhole: an interactive image-crop previewer for 2D drawing surfaces.
//!
//! The previewer shows a source image through a fixed-aspect viewport,
//! overlays a grid and a circular vignette, lets the user pan the visible
//! crop with mouse or single-touch drags, and exports the crop as a JPEG.
//!
//! The heavy lifting lives in the kernel crates: [`keyhole_viewport`] for
//! the crop/viewport transform engine, [`keyhole_gesture`] for drag state,
//! and [`keyhole_surface`] for the drawing boundary. This crate wires them
//! into a widget:
//!
//! - [`Previewer`] — the widget itself; owns the surface, viewport, crop,
//!   and gesture state.
//! - [`PreviewerConfig`] — validated construction options.
//! - [`SaveSink`] / [`DirectorySink`] — the file-save boundary for
//!   exported crops.
//!
//! ## Getting started
//!
//! ```
//! use keyhole_previewer::{Previewer, PreviewerConfig};
//! use keyhole_surface_ref::RefSurface;
//!
//! // Any Surface implementation works; the recording surface is handy in
//! // tests and headless setups.
//! let config = PreviewerConfig::new(800.0, 800.0);
//! let mut previewer = Previewer::new(RefSurface::default(), config).unwrap();
//!
//! // The embedder forwards layout and input events:
//! previewer.container_resized(400.0);
//! assert_eq!(previewer.viewport().responsive_scale(), 0.5);
//! ```
//!
//! Loading an image fits the largest target-aspect rectangle inside it and
//! centers it; dragging pans that rectangle, clamped to the image bounds;
//! resizing the container rescales the viewport and recenters the crop.
//!
//! ## Threading
//!
//! All state lives in one `Previewer` value mutated through `&mut self`
//! from the embedder's event loop. Decode and export are synchronous,
//! single-shot operations; move them off-thread if their latency matters.

mod config;
mod error;
mod export;
mod previewer;

pub use config::PreviewerConfig;
pub use error::{ConfigError, ExportError, LoadError};
pub use export::{DirectorySink, SaveSink};
pub use previewer::Previewer;

// The vocabulary types that appear in the public API.
pub use keyhole_gesture::touch::TouchPoint;
pub use keyhole_viewport::overlay::{OverlayOptions, OverlayPatch, VignetteRadius};
pub use keyhole_viewport::{CropRegion, Viewport};
