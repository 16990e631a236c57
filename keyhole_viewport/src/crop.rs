// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect, Size, Vec2};

/// Error returned by [`CropRegion::fit`] when the source image has no pixels.
///
/// This typically means the image has not finished decoding or the source was
/// degenerate. The previous crop state, if any, should be left untouched by
/// callers so the widget remains usable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EmptySourceError {
    /// Natural width of the rejected source, in pixels.
    pub width: f64,
    /// Natural height of the rejected source, in pixels.
    pub height: f64,
}

impl fmt::Display for EmptySourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source image has no visible pixels ({}x{})",
            self.width, self.height
        )
    }
}

impl core::error::Error for EmptySourceError {}

/// The visible sub-rectangle of a source image, in source pixel space.
///
/// `CropRegion` tracks which part of an image is shown through a fixed-aspect
/// viewport. It can be used to:
/// - Fit the largest target-aspect rectangle inside the image bounds.
/// - Pan the visible rectangle by pixel deltas with per-axis clamping.
/// - Re-derive the rectangle when the target dimensions change.
///
/// The region never owns pixel data; it sees the image only as its natural
/// size. All coordinates are in source-image pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct CropRegion {
    natural: Size,
    offset: Point,
    slice: Size,
}

impl CropRegion {
    /// Computes the centered crop of `target`'s aspect ratio inside an image
    /// of the given natural size.
    ///
    /// The slice is the largest rectangle of aspect `target.width /
    /// target.height` that fits inside the natural bounds:
    /// - a source at least as wide as the target aspect keeps the full image
    ///   height and trims the sides;
    /// - a taller source keeps the full width and trims top and bottom.
    ///
    /// `target` must have positive dimensions; callers validate their
    /// configuration before reaching this layer.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySourceError`] if either natural dimension is not
    /// positive (the image is not decoded or degenerate).
    pub fn fit(natural: Size, target: Size) -> Result<Self, EmptySourceError> {
        debug_assert!(
            target.width > 0.0 && target.height > 0.0,
            "target dimensions must be validated by the caller"
        );
        if !(natural.width > 0.0 && natural.height > 0.0) {
            return Err(EmptySourceError {
                width: natural.width,
                height: natural.height,
            });
        }

        let slice = Self::fitted_slice(natural, target);
        Ok(Self {
            natural,
            offset: Self::centered(natural, slice),
            slice,
        })
    }

    /// Shifts the crop by `delta`, clamping each axis independently so the
    /// rectangle never exits the image.
    ///
    /// The delta is interpreted directly in source pixel space. Out-of-range
    /// deltas are silently clamped rather than rejected: dragging past an
    /// edge pins the crop to that edge. The result depends only on the
    /// current offset and the delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        let max = self.max_offset();
        self.offset = Point::new(
            (self.offset.x + delta.x).clamp(0.0, max.x),
            (self.offset.y + delta.y).clamp(0.0, max.y),
        );
    }

    /// Re-derives the slice for new target dimensions and recenters it.
    ///
    /// Pan progress does not survive a refit; layout changes always return
    /// to the centered crop.
    pub fn refit(&mut self, target: Size) {
        debug_assert!(
            target.width > 0.0 && target.height > 0.0,
            "target dimensions must be validated by the caller"
        );
        self.slice = Self::fitted_slice(self.natural, target);
        self.offset = Self::centered(self.natural, self.slice);
    }

    /// Returns the top-left corner of the visible rectangle.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Returns the size of the visible rectangle.
    #[must_use]
    pub fn slice_size(&self) -> Size {
        self.slice
    }

    /// Returns the natural size of the source image.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        self.natural
    }

    /// Returns the visible rectangle in source pixel space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.slice)
    }

    /// Largest offset on each axis that keeps the slice inside the image.
    fn max_offset(&self) -> Vec2 {
        Vec2::new(
            (self.natural.width - self.slice.width).max(0.0),
            (self.natural.height - self.slice.height).max(0.0),
        )
    }

    fn fitted_slice(natural: Size, target: Size) -> Size {
        let target_aspect = target.width / target.height;
        let natural_aspect = natural.width / natural.height;
        if natural_aspect >= target_aspect {
            // The `min` guards against the width creeping past the natural
            // bounds when the two aspects are nearly equal.
            let height = natural.height;
            Size::new((height * target_aspect).min(natural.width), height)
        } else {
            let width = natural.width;
            Size::new(width, (width / target_aspect).min(natural.height))
        }
    }

    fn centered(natural: Size, slice: Size) -> Point {
        Point::new(
            (natural.width - slice.width) / 2.0,
            (natural.height - slice.height) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::{CropRegion, EmptySourceError};

    #[test]
    fn wide_image_keeps_full_height() {
        let crop = CropRegion::fit(Size::new(4000.0, 2000.0), Size::new(800.0, 800.0)).unwrap();

        assert_eq!(crop.slice_size(), Size::new(2000.0, 2000.0));
        assert_eq!(crop.offset().x, 1000.0);
        assert_eq!(crop.offset().y, 0.0);
    }

    #[test]
    fn tall_image_keeps_full_width() {
        let crop = CropRegion::fit(Size::new(1000.0, 3000.0), Size::new(400.0, 200.0)).unwrap();

        assert_eq!(crop.slice_size(), Size::new(1000.0, 500.0));
        assert_eq!(crop.offset().x, 0.0);
        assert_eq!(crop.offset().y, 1250.0);
    }

    #[test]
    fn slice_preserves_target_aspect_ratio() {
        let sources = [
            Size::new(4000.0, 2000.0),
            Size::new(333.0, 777.0),
            Size::new(1024.0, 1024.0),
            Size::new(1.0, 5000.0),
        ];
        let targets = [
            Size::new(800.0, 800.0),
            Size::new(1920.0, 1080.0),
            Size::new(75.0, 300.0),
        ];

        for natural in sources {
            for target in targets {
                let crop = CropRegion::fit(natural, target).unwrap();
                let slice = crop.slice_size();
                let got = slice.width / slice.height;
                let want = target.width / target.height;
                assert!(
                    (got - want).abs() < 1e-9 * want,
                    "aspect mismatch for {natural:?} in {target:?}: {got} vs {want}"
                );
                assert!(slice.width <= natural.width + 1e-9, "slice too wide");
                assert!(slice.height <= natural.height + 1e-9, "slice too tall");
            }
        }
    }

    #[test]
    fn empty_source_is_rejected() {
        let err = CropRegion::fit(Size::new(0.0, 600.0), Size::new(100.0, 100.0)).unwrap_err();
        assert_eq!(
            err,
            EmptySourceError {
                width: 0.0,
                height: 600.0
            }
        );
        assert!(CropRegion::fit(Size::new(800.0, 0.0), Size::new(100.0, 100.0)).is_err());
    }

    #[test]
    fn pan_clamps_at_the_left_edge() {
        let mut crop = CropRegion::fit(Size::new(4000.0, 2000.0), Size::new(800.0, 800.0)).unwrap();

        // Raw offset would be 1000 - 1500 = -500; it pins to zero instead.
        crop.pan_by(Vec2::new(-1500.0, 0.0));
        assert_eq!(crop.offset().x, 0.0);
        assert_eq!(crop.offset().y, 0.0);
    }

    #[test]
    fn pan_sequences_stay_in_bounds() {
        let mut crop = CropRegion::fit(Size::new(4000.0, 2000.0), Size::new(800.0, 800.0)).unwrap();
        let deltas = [
            Vec2::new(600.0, 10.0),
            Vec2::new(-9000.0, -9000.0),
            Vec2::new(123.5, 0.25),
            Vec2::new(1e9, 1e9),
            Vec2::new(-0.5, -0.5),
        ];

        for delta in deltas {
            crop.pan_by(delta);
            let offset = crop.offset();
            let slice = crop.slice_size();
            let natural = crop.natural_size();
            assert!(offset.x >= 0.0 && offset.x <= natural.width - slice.width);
            assert!(offset.y >= 0.0 && offset.y <= natural.height - slice.height);
        }
    }

    #[test]
    fn pan_never_changes_the_slice() {
        let mut crop = CropRegion::fit(Size::new(1200.0, 900.0), Size::new(300.0, 100.0)).unwrap();
        let slice = crop.slice_size();

        crop.pan_by(Vec2::new(40.0, -1000.0));
        crop.pan_by(Vec2::new(-80.0, 3.0));
        assert_eq!(crop.slice_size(), slice);
    }

    #[test]
    fn refit_recenters_after_panning() {
        let mut crop = CropRegion::fit(Size::new(4000.0, 2000.0), Size::new(800.0, 800.0)).unwrap();
        crop.pan_by(Vec2::new(-700.0, 100.0));
        assert_ne!(crop.offset().x, 1000.0);

        crop.refit(Size::new(800.0, 800.0));
        assert_eq!(crop.offset().x, (4000.0 - crop.slice_size().width) / 2.0);
        assert_eq!(crop.offset().y, 0.0);
    }

    #[test]
    fn refit_is_idempotent() {
        let mut crop = CropRegion::fit(Size::new(3024.0, 4032.0), Size::new(640.0, 480.0)).unwrap();
        crop.refit(Size::new(1280.0, 720.0));
        let (offset, slice) = (crop.offset(), crop.slice_size());

        crop.refit(Size::new(1280.0, 720.0));
        assert_eq!(crop.offset(), offset);
        assert_eq!(crop.slice_size(), slice);
    }

    #[test]
    fn rect_combines_offset_and_slice() {
        let crop = CropRegion::fit(Size::new(4000.0, 2000.0), Size::new(800.0, 800.0)).unwrap();
        let rect = crop.rect();

        assert_eq!(rect.origin(), crop.offset());
        assert_eq!(rect.size(), crop.slice_size());
        assert_eq!(rect.x1, 3000.0);
        assert_eq!(rect.y1, 2000.0);
    }

    #[test]
    fn matching_aspect_shows_the_whole_image() {
        let mut crop = CropRegion::fit(Size::new(1600.0, 900.0), Size::new(320.0, 180.0)).unwrap();

        assert_eq!(crop.slice_size(), Size::new(1600.0, 900.0));
        assert_eq!(crop.offset(), kurbo::Point::ZERO);

        // With no slack there is nowhere to pan.
        crop.pan_by(Vec2::new(50.0, -50.0));
        assert_eq!(crop.offset(), kurbo::Point::ZERO);
    }
}
