// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyhole Surface Reference Backend.
//!
//! This crate provides a small, stateful implementation of
//! [`Surface`] and [`SurfaceResources`] for **call recording**.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - It records every drawing call as an [`Event`] so tests can assert on
//!   the exact sequence of operations a render pass produced (for example,
//!   that disabling the vignette removes its fill call).

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Rect};

use keyhole_surface::{
    Color, FillRule, ImageDesc, ImageId, StrokeStyle, Surface, SurfaceResources,
};

/// Drawing call recorded by the reference surface.
#[derive(Clone, Debug)]
pub enum Event {
    /// A rectangle was cleared.
    Clear {
        /// Cleared rectangle.
        rect: Rect,
    },
    /// A path was filled.
    FillPath {
        /// The filled path.
        path: BezPath,
        /// Fill rule in effect.
        fill_rule: FillRule,
        /// Fill color.
        color: Color,
    },
    /// A path was stroked.
    StrokePath {
        /// The stroked path.
        path: BezPath,
        /// Stroke style, including width.
        style: StrokeStyle,
        /// Stroke color.
        color: Color,
    },
    /// An image sub-rectangle was drawn.
    DrawImageRect {
        /// Source image resource.
        image: ImageId,
        /// Source rectangle in image pixels.
        src: Rect,
        /// Destination rectangle in viewport pixels.
        dst: Rect,
    },
}

/// Recording implementation of the Keyhole surface.
///
/// This backend:
/// - Stores image descriptors and pixels in slots keyed by their IDs,
/// - Records every drawing call as an [`Event`] in call order,
/// - Tolerates double-destroys and unknown IDs.
#[derive(Default, Debug)]
pub struct RefSurface {
    images: Vec<Option<(ImageDesc, Vec<u8>)>>,
    events: Vec<Event>,
}

impl RefSurface {
    /// Returns a slice of recorded events in call order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Clears all recorded events but keeps resources.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Returns the descriptor of an installed image, if it is still alive.
    pub fn image_desc(&self, id: ImageId) -> Option<ImageDesc> {
        self.images
            .get(id.0 as usize)
            .and_then(|slot| slot.as_ref())
            .map(|(desc, _)| *desc)
    }

    /// Returns the number of currently live image resources.
    pub fn live_images(&self) -> usize {
        self.images.iter().filter(|slot| slot.is_some()).count()
    }
}

impl SurfaceResources for RefSurface {
    fn create_image(&mut self, desc: ImageDesc, pixels: &[u8]) -> ImageId {
        let id = u32::try_from(self.images.len())
            .expect("RefSurface: too many images for u32 ImageId");
        self.images.push(Some((desc, pixels.to_vec())));
        ImageId(id)
    }

    fn destroy_image(&mut self, id: ImageId) {
        let idx = id.0 as usize;
        if let Some(slot) = self.images.get_mut(idx) {
            *slot = None;
        }
    }
}

impl Surface for RefSurface {
    fn clear(&mut self, rect: Rect) {
        self.events.push(Event::Clear { rect });
    }

    fn fill_path(&mut self, path: &BezPath, fill_rule: FillRule, color: Color) {
        self.events.push(Event::FillPath {
            path: path.clone(),
            fill_rule,
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle, color: Color) {
        self.events.push(Event::StrokePath {
            path: path.clone(),
            style: style.clone(),
            color,
        });
    }

    fn draw_image_rect(&mut self, image: ImageId, src: Rect, dst: Rect) {
        self.events.push(Event::DrawImageRect { image, src, dst });
    }
}
