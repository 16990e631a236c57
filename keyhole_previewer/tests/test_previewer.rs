// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget-level tests driving a [`Previewer`] over the recording surface.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use kurbo::{Point, Rect, Size};

use keyhole_previewer::{
    ConfigError, LoadError, OverlayPatch, Previewer, PreviewerConfig, TouchPoint,
};
use keyhole_surface_ref::{Event, RefSurface};

/// Encode a synthetic gradient image as PNG bytes.
fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encoding of a synthetic image");
    bytes
}

fn previewer(width: f64, height: f64) -> Previewer<RefSurface> {
    Previewer::new(RefSurface::default(), PreviewerConfig::new(width, height))
        .expect("valid config")
}

fn fill_count(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::FillPath { .. }))
        .count()
}

fn last_image_draw(events: &[Event]) -> Option<(Rect, Rect)> {
    events.iter().rev().find_map(|e| match e {
        Event::DrawImageRect { src, dst, .. } => Some((*src, *dst)),
        _ => None,
    })
}

#[test]
fn construction_draws_grid_and_vignette() {
    let previewer = previewer(800.0, 800.0);
    let events = previewer.surface().events();

    assert!(matches!(events[0], Event::Clear { .. }));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, Event::StrokePath { .. })),
        "grid stroke expected"
    );
    assert_eq!(fill_count(events), 1, "vignette fill expected");
    assert!(!previewer.has_image());
}

#[test]
fn grid_uses_the_configured_stroke() {
    let previewer = previewer(800.0, 800.0);
    let stroke = previewer
        .surface()
        .events()
        .iter()
        .find_map(|e| match e {
            Event::StrokePath { style, .. } => Some(style.width),
            _ => None,
        })
        .expect("grid stroke event");
    assert_eq!(stroke, 0.25);
}

#[test]
fn invalid_dimensions_fail_construction() {
    let err = Previewer::new(RefSurface::default(), PreviewerConfig::new(0.0, 800.0)).unwrap_err();
    assert_eq!(err, ConfigError::InvalidWidth(0.0));

    let err =
        Previewer::new(RefSurface::default(), PreviewerConfig::new(800.0, -1.0)).unwrap_err();
    assert_eq!(err, ConfigError::InvalidHeight(-1.0));

    assert!(Previewer::new(
        RefSurface::default(),
        PreviewerConfig::new(f64::NAN, 800.0)
    )
    .is_err());
}

#[test]
fn disabling_the_crosshair_removes_the_vignette() {
    let config = PreviewerConfig {
        crosshair: false,
        ..PreviewerConfig::new(800.0, 800.0)
    };
    let previewer = Previewer::new(RefSurface::default(), config).expect("valid config");
    assert_eq!(fill_count(previewer.surface().events()), 0);
}

#[test]
fn option_patches_take_effect_on_the_next_render() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.surface_mut().clear_events();

    previewer.set_options(OverlayPatch {
        crosshair: Some(false),
        radius: None,
    });
    // The merge alone does not redraw.
    assert!(previewer.surface().events().is_empty());

    previewer.render();
    assert_eq!(fill_count(previewer.surface().events()), 0);
}

#[test]
fn loading_fits_and_centers_the_crop() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");

    let crop = previewer.crop().expect("crop after load");
    assert_eq!(crop.slice_size(), Size::new(2000.0, 2000.0));
    assert_eq!(crop.offset(), Point::new(1000.0, 0.0));

    let (src, dst) = last_image_draw(previewer.surface().events()).expect("image draw");
    assert_eq!(src, Rect::new(1000.0, 0.0, 3000.0, 2000.0));
    assert_eq!(dst, Rect::new(0.0, 0.0, 800.0, 800.0));
}

#[test]
fn render_order_is_clear_grid_image_vignette() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(1000, 1000)).expect("load");

    previewer.surface_mut().clear_events();
    previewer.render();

    let kinds: Vec<&'static str> = previewer
        .surface()
        .events()
        .iter()
        .map(|e| match e {
            Event::Clear { .. } => "clear",
            Event::StrokePath { .. } => "stroke",
            Event::DrawImageRect { .. } => "image",
            Event::FillPath { .. } => "fill",
        })
        .collect();
    assert_eq!(kinds, ["clear", "stroke", "image", "fill"]);
}

#[test]
fn dragging_pans_against_the_pointer_and_clamps() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");

    // Drag right by 1500px: offset 1000 - 1500 clamps to 0.
    previewer.pointer_pressed(Point::new(100.0, 100.0));
    previewer.pointer_moved(Point::new(1600.0, 100.0));

    let crop = previewer.crop().expect("crop");
    assert_eq!(crop.offset(), Point::new(0.0, 0.0));

    // Dragging back left moves the offset the other way.
    previewer.pointer_moved(Point::new(1100.0, 100.0));
    assert_eq!(previewer.crop().expect("crop").offset().x, 500.0);
}

#[test]
fn panning_redraws_content_but_not_the_grid() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");
    previewer.surface_mut().clear_events();

    previewer.pointer_pressed(Point::new(0.0, 0.0));
    previewer.pointer_moved(Point::new(-10.0, 0.0));

    let events = previewer.surface().events();
    assert!(events.iter().any(|e| matches!(e, Event::DrawImageRect { .. })));
    assert!(!events.iter().any(|e| matches!(e, Event::StrokePath { .. })));
    assert!(!events.iter().any(|e| matches!(e, Event::Clear { .. })));
}

#[test]
fn moves_without_a_press_do_nothing() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");
    let before = previewer.crop().expect("crop").offset();

    previewer.pointer_moved(Point::new(500.0, 500.0));
    assert_eq!(previewer.crop().expect("crop").offset(), before);
}

#[test]
fn leaving_the_widget_ends_the_drag() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");

    previewer.pointer_pressed(Point::new(100.0, 100.0));
    previewer.pointer_left();
    let before = previewer.crop().expect("crop").offset();

    // A move after the implicit release must not pan.
    previewer.pointer_moved(Point::new(900.0, 100.0));
    assert_eq!(previewer.crop().expect("crop").offset(), before);
}

#[test]
fn client_positions_are_localized_against_the_origin() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");
    previewer.set_origin(Point::new(250.0, 40.0));

    // Identical client-space drag as in the unlocalized test; deltas (and
    // therefore the pan) are unchanged by the constant offset.
    previewer.pointer_pressed(Point::new(350.0, 140.0));
    previewer.pointer_moved(Point::new(850.0, 140.0));

    assert_eq!(previewer.crop().expect("crop").offset().x, 500.0);
}

#[test]
fn a_second_finger_does_not_steal_the_gesture() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");

    previewer.touches_began(&[TouchPoint::new(1, Point::new(100.0, 100.0))]);
    previewer.touches_began(&[
        TouchPoint::new(2, Point::new(700.0, 700.0)),
        TouchPoint::new(1, Point::new(100.0, 100.0)),
    ]);

    // Only touch 1 moving pans; touch 2 is ignored.
    previewer.touches_moved(&[
        TouchPoint::new(2, Point::new(0.0, 0.0)),
        TouchPoint::new(1, Point::new(300.0, 100.0)),
    ]);
    assert_eq!(previewer.crop().expect("crop").offset().x, 800.0);

    previewer.touches_moved(&[TouchPoint::new(2, Point::new(100.0, 0.0))]);
    assert_eq!(previewer.crop().expect("crop").offset().x, 800.0);
}

#[test]
fn touch_end_and_cancel_reset_the_gesture() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");

    previewer.touches_began(&[TouchPoint::new(5, Point::new(100.0, 100.0))]);
    previewer.touches_ended();
    let before = previewer.crop().expect("crop").offset();

    previewer.touches_moved(&[TouchPoint::new(5, Point::new(400.0, 100.0))]);
    assert_eq!(previewer.crop().expect("crop").offset(), before);
}

#[test]
fn resize_rescales_and_recenters() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");

    // Pan away from center first.
    previewer.pointer_pressed(Point::new(500.0, 100.0));
    previewer.pointer_moved(Point::new(100.0, 100.0));
    assert_ne!(previewer.crop().expect("crop").offset().x, 1000.0);

    previewer.container_resized(400.0);
    assert_eq!(previewer.viewport().responsive_scale(), 0.5);
    assert_eq!(previewer.viewport().effective_size(), Size::new(400.0, 400.0));

    // The crop recentered and the redraw targets the effective rect.
    assert_eq!(previewer.crop().expect("crop").offset(), Point::new(1000.0, 0.0));
    let (_, dst) = last_image_draw(previewer.surface().events()).expect("image draw");
    assert_eq!(dst, Rect::new(0.0, 0.0, 400.0, 400.0));
}

#[test]
fn resize_during_a_drag_keeps_the_offset_valid() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");

    previewer.pointer_pressed(Point::new(400.0, 100.0));
    previewer.pointer_moved(Point::new(200.0, 100.0));
    previewer.container_resized(400.0);

    // The gesture is still live; the next move pans from a stale anchor but
    // the offset stays inside the image.
    previewer.pointer_moved(Point::new(50.0, 100.0));
    let crop = previewer.crop().expect("crop");
    let max_x = crop.natural_size().width - crop.slice_size().width;
    assert!(crop.offset().x >= 0.0 && crop.offset().x <= max_x);
}

#[test]
fn zero_width_container_renders_degenerately_but_safely() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(1000, 1000)).expect("load");

    previewer.container_resized(0.0);
    assert_eq!(previewer.viewport().responsive_scale(), 0.0);
    assert_eq!(previewer.viewport().effective_size(), Size::ZERO);
}

#[test]
fn failed_load_preserves_the_previous_image() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");
    let before = previewer.crop().expect("crop").clone();

    let err = previewer.load_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, LoadError::Decode(_)));

    assert!(previewer.has_image());
    assert_eq!(previewer.crop().expect("crop"), &before);
    assert_eq!(previewer.surface().live_images(), 1);
}

#[test]
fn reloading_replaces_the_surface_resource() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(1000, 1000)).expect("load");
    previewer.load_image(&png_bytes(600, 600)).expect("reload");

    assert_eq!(previewer.surface().live_images(), 1);
    assert_eq!(
        previewer.crop().expect("crop").natural_size(),
        Size::new(600.0, 600.0)
    );
}

#[test]
fn set_target_dimensions_refits_the_crop() {
    let mut previewer = previewer(800.0, 800.0);
    previewer.load_image(&png_bytes(4000, 2000)).expect("load");

    previewer
        .set_target_dimensions(Size::new(400.0, 100.0))
        .expect("valid dimensions");

    let crop = previewer.crop().expect("crop");
    let slice = crop.slice_size();
    assert!((slice.width / slice.height - 4.0).abs() < 1e-9);
    assert_eq!(previewer.viewport().aspect_ratio(), 4.0);

    // Invalid dimensions change nothing.
    let err = previewer.set_target_dimensions(Size::new(0.0, 100.0)).unwrap_err();
    assert_eq!(err, ConfigError::InvalidWidth(0.0));
    assert_eq!(previewer.viewport().aspect_ratio(), 4.0);
}
