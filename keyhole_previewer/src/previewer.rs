// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use image::RgbaImage;
use kurbo::{BezPath, Point, Rect, Shape, Size, Vec2};

use keyhole_gesture::pan::PanGesture;
use keyhole_gesture::touch::{TouchPan, TouchPoint};
use keyhole_surface::{Color, FillRule, ImageDesc, ImageId, StrokeStyle, Surface};
use keyhole_viewport::overlay::{self, OverlayOptions, OverlayPatch};
use keyhole_viewport::{CropRegion, Viewport};

use crate::config::{self, PreviewerConfig};
use crate::error::{ConfigError, ExportError, LoadError};
use crate::export::{self, SaveSink};

/// Grid stroke: light gray, hairline.
const GRID_COLOR: Color = Color::from_rgba8(0x88, 0x88, 0x88, 0xFF);
const GRID_STROKE_WIDTH: f64 = 0.25;

/// Vignette fill: translucent black.
const VIGNETTE_COLOR: Color = Color::from_rgba8(0x00, 0x00, 0x00, 0x77);

/// Flattening tolerance for the vignette circle.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// A loaded source image and its surface-side resource.
#[derive(Debug)]
struct LoadedImage {
    pixels: RgbaImage,
    id: ImageId,
}

/// Interactive image-crop previewer over a drawing surface.
///
/// The previewer owns its surface, viewport, crop state, and gesture
/// trackers. Embedders construct it with [`Previewer::new`], feed it decoded
/// bytes via [`Previewer::load_image`], and forward raw input events to the
/// handler methods; the previewer redraws itself as needed.
///
/// ## Event wiring
///
/// The embedder owns the event loop and calls:
/// - [`Previewer::pointer_pressed`] / [`Previewer::pointer_moved`] /
///   [`Previewer::pointer_released`] / [`Previewer::pointer_left`] for mouse
///   input (leaving the widget is an implicit release, so a drag can never
///   get stuck when the pointer exits);
/// - [`Previewer::touches_began`] / [`Previewer::touches_moved`] /
///   [`Previewer::touches_ended`] / [`Previewer::touches_cancelled`] for
///   touch input — the adapter must suppress the platform's default
///   scroll/zoom for the duration of the gesture;
/// - [`Previewer::container_resized`] whenever the hosting container's
///   width changes.
///
/// Pointer and touch positions are passed in client coordinates; the
/// previewer subtracts the surface origin ([`Previewer::set_origin`]) to get
/// viewport-local pixels before any delta computation.
///
/// One previewer drives one surface. Independent instances share no state.
pub struct Previewer<S: Surface> {
    surface: S,
    viewport: Viewport,
    options: OverlayOptions,
    grid_increment: f64,
    origin: Point,
    image: Option<LoadedImage>,
    crop: Option<CropRegion>,
    pointer: PanGesture,
    touch: TouchPan,
}

impl<S: Surface> Previewer<S> {
    /// Creates a previewer over `surface` and draws the empty preview
    /// (grid and vignette, no image yet).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured dimensions are not
    /// positive finite numbers.
    pub fn new(surface: S, config: PreviewerConfig) -> Result<Self, ConfigError> {
        let target = config.validated_target()?;
        let mut previewer = Self {
            surface,
            viewport: Viewport::new(target),
            options: OverlayOptions {
                crosshair: config.crosshair,
                radius: config.radius,
            },
            grid_increment: overlay::grid_increment(target),
            origin: Point::ZERO,
            image: None,
            crop: None,
            pointer: PanGesture::default(),
            touch: TouchPan::default(),
        };
        previewer.render();
        Ok(previewer)
    }

    /// Returns the underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the underlying surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns the viewport (target dimensions + responsive scale).
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns the current crop region, if an image is loaded.
    pub fn crop(&self) -> Option<&CropRegion> {
        self.crop.as_ref()
    }

    /// Returns the current overlay options.
    pub fn options(&self) -> OverlayOptions {
        self.options
    }

    /// Returns `true` once an image has been loaded.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Sets the surface's on-screen top-left corner in client coordinates.
    ///
    /// The embedder updates this whenever layout moves the widget; all
    /// pointer and touch positions are localized against it.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Decodes `bytes` and shows the new image, fitted and centered.
    ///
    /// On success the previous image (if any) is replaced, its surface
    /// resource destroyed, and a full redraw issued.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the bytes cannot be decoded or decode to an
    /// empty image. On error the previously shown image and its crop are
    /// left untouched, so the widget stays usable.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        let decoded = image::load_from_memory(bytes)?;
        let pixels = decoded.to_rgba8();
        let (width, height) = pixels.dimensions();
        let natural = Size::new(f64::from(width), f64::from(height));
        let crop = CropRegion::fit(natural, self.viewport.target())?;
        tracing::debug!(width, height, "loaded source image");

        if let Some(previous) = self.image.take() {
            self.surface.destroy_image(previous.id);
        }
        let id = self
            .surface
            .create_image(ImageDesc { width, height }, pixels.as_raw());
        self.image = Some(LoadedImage { pixels, id });
        self.crop = Some(crop);
        self.render();
        Ok(())
    }

    /// Replaces the target dimensions, refitting and recentering the crop.
    ///
    /// The grid density is re-derived from the new dimensions, and a full
    /// redraw is issued. Call [`Previewer::container_resized`] afterwards
    /// if the container width should constrain the new dimensions too.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] (and changes nothing) if the dimensions are
    /// not positive finite numbers.
    pub fn set_target_dimensions(&mut self, dimensions: Size) -> Result<(), ConfigError> {
        let target = config::validate_dimensions(dimensions.width, dimensions.height)?;
        self.viewport.set_target(target);
        self.grid_increment = overlay::grid_increment(target);
        if let Some(crop) = &mut self.crop {
            crop.refit(target);
        }
        self.render();
        Ok(())
    }

    /// Shallow-merges `patch` into the overlay options.
    ///
    /// The change takes effect on the next redraw.
    pub fn set_options(&mut self, patch: OverlayPatch) {
        self.options.apply(patch);
    }

    /// Handles a container resize: rescale, recenter, redraw.
    ///
    /// The responsive scale is recomputed from the new width, the crop is
    /// refitted (recentered — pan progress does not survive a resize), and
    /// the whole preview redrawn. This may interleave with an active drag;
    /// panning clamps on every move, so the crop cannot leave the image.
    pub fn container_resized(&mut self, container_width: f64) {
        let scale = self.viewport.recompute_scale(container_width);
        tracing::debug!(scale, "container resized");
        if let Some(crop) = &mut self.crop {
            crop.refit(self.viewport.target());
        }
        self.render();
    }

    /// Handles a mouse press at a client position.
    ///
    /// Starts a drag only when an image is loaded.
    pub fn pointer_pressed(&mut self, pos: Point) {
        if self.crop.is_some() {
            let local = self.to_local(pos);
            self.pointer.begin(local);
        }
    }

    /// Handles a mouse move at a client position.
    ///
    /// While a drag is active, pans the crop by the anchored delta and
    /// redraws the image and vignette.
    pub fn pointer_moved(&mut self, pos: Point) {
        let local = self.to_local(pos);
        if let Some(delta) = self.pointer.update(local) {
            self.pan(delta);
        }
    }

    /// Handles a mouse release: ends the drag.
    pub fn pointer_released(&mut self) {
        self.pointer.finish();
    }

    /// Handles the pointer leaving the widget: treated as a release.
    pub fn pointer_left(&mut self) {
        self.pointer.finish();
    }

    /// Handles a touch-start event with the current active touches, in
    /// client coordinates.
    ///
    /// The first touch is latched as the tracked finger; further fingers
    /// are ignored until the gesture ends.
    pub fn touches_began(&mut self, touches: &[TouchPoint]) {
        if self.crop.is_some() {
            let local = self.localize_touches(touches);
            self.touch.begin(&local);
        }
    }

    /// Handles a touch-move event with the current active touches.
    pub fn touches_moved(&mut self, touches: &[TouchPoint]) {
        let local = self.localize_touches(touches);
        if let Some(delta) = self.touch.update(&local) {
            self.pan(delta);
        }
    }

    /// Handles a touch-end event: ends the gesture.
    pub fn touches_ended(&mut self) {
        self.touch.cancel();
    }

    /// Handles a touch-cancel event: ends the gesture.
    pub fn touches_cancelled(&mut self) {
        self.touch.cancel();
    }

    /// Redraws the whole preview: clear, grid, image slice, vignette.
    pub fn render(&mut self) {
        let effective = self.viewport.effective_size();
        self.surface
            .clear(Rect::from_origin_size(Point::ZERO, effective));
        self.draw_grid(effective);
        self.draw_content(effective);
    }

    /// Encodes the current crop as JPEG and returns the bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if no image is loaded or encoding fails.
    pub fn export_crop(&self) -> Result<Vec<u8>, ExportError> {
        let (image, crop) = self.loaded()?;
        export::encode_jpeg(&image.pixels, crop)
    }

    /// Encodes the current crop and saves it through `sink` as
    /// `keyhole-<width>X<height>.jpeg`.
    ///
    /// Returns the file name used.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if no image is loaded, encoding fails, or
    /// the sink rejects the bytes. The sink is not invoked on encode
    /// failure.
    pub fn save_crop(&self, sink: &mut dyn SaveSink) -> Result<String, ExportError> {
        let (image, crop) = self.loaded()?;
        let bytes = export::encode_jpeg(&image.pixels, crop)?;
        let name = export::file_name(crop);
        sink.save(&name, &bytes)?;
        tracing::info!(file = %name, "saved crop");
        Ok(name)
    }

    fn loaded(&self) -> Result<(&LoadedImage, &CropRegion), ExportError> {
        match (&self.image, &self.crop) {
            (Some(image), Some(crop)) => Ok((image, crop)),
            _ => Err(ExportError::NoImage),
        }
    }

    fn to_local(&self, raw: Point) -> Point {
        (raw - self.origin).to_point()
    }

    fn localize_touches(&self, touches: &[TouchPoint]) -> Vec<TouchPoint> {
        touches
            .iter()
            .map(|t| TouchPoint::new(t.id, self.to_local(t.position)))
            .collect()
    }

    /// Pans the crop and redraws image + vignette over the existing
    /// backdrop (the grid does not change while panning).
    fn pan(&mut self, delta: Vec2) {
        if let Some(crop) = &mut self.crop {
            crop.pan_by(delta);
            let effective = self.viewport.effective_size();
            self.draw_content(effective);
        }
    }

    fn draw_grid(&mut self, effective: Size) {
        let mut path = BezPath::new();
        for x in overlay::grid_offsets(self.grid_increment, effective.width) {
            path.move_to((x, 0.0));
            path.line_to((x, effective.height));
        }
        for y in overlay::grid_offsets(self.grid_increment, effective.height) {
            path.move_to((0.0, y));
            path.line_to((effective.width, y));
        }
        if !path.elements().is_empty() {
            self.surface
                .stroke_path(&path, &StrokeStyle::new(GRID_STROKE_WIDTH), GRID_COLOR);
        }
    }

    fn draw_content(&mut self, effective: Size) {
        let frame = Rect::from_origin_size(Point::ZERO, effective);
        if let (Some(image), Some(crop)) = (&self.image, &self.crop) {
            self.surface.draw_image_rect(image.id, crop.rect(), frame);
        }
        self.draw_vignette(effective);
    }

    fn draw_vignette(&mut self, effective: Size) {
        if !self.options.crosshair {
            return;
        }
        let circle = overlay::vignette_circle(
            effective,
            self.viewport.responsive_scale(),
            self.options.radius,
        );
        // Frame with a circular hole: even-odd fill of rect + circle.
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((effective.width, 0.0));
        path.line_to((effective.width, effective.height));
        path.line_to((0.0, effective.height));
        path.close_path();
        for el in circle.path_elements(CIRCLE_TOLERANCE) {
            path.push(el);
        }
        self.surface
            .fill_path(&path, FillRule::EvenOdd, VIGNETTE_COLOR);
    }
}

impl<S: Surface> Drop for Previewer<S> {
    fn drop(&mut self) {
        if let Some(image) = self.image.take() {
            self.surface.destroy_image(image.id);
        }
    }
}

impl<S: Surface> fmt::Debug for Previewer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Previewer")
            .field("viewport", &self.viewport)
            .field("options", &self.options)
            .field("origin", &self.origin)
            .field("crop", &self.crop)
            .field("has_image", &self.image.is_some())
            .finish_non_exhaustive()
    }
}
