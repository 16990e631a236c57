// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay geometry: grid line placement and the vignette circle.
//!
//! These are pure functions of the viewport dimensions and the overlay
//! options; issuing the actual draw calls is the renderer's job. Grid
//! density is derived from the *unscaled* target dimensions so the grid
//! keeps the same number of cells at every responsive scale, while the
//! vignette is derived from the *effective* dimensions so it tracks what is
//! actually on screen.

use kurbo::{Circle, Point, Size};

/// Fraction of `target.width + target.height` between adjacent grid lines.
const GRID_SPACING_FACTOR: f64 = 0.1;

/// Fraction of `effective.width + effective.height` used for the automatic
/// vignette hole radius.
const AUTO_RADIUS_FACTOR: f64 = 0.21;

/// Vignette hole radius configuration.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VignetteRadius {
    /// Derive the radius from the effective viewport dimensions.
    #[default]
    Auto,
    /// A fixed radius in target-space pixels.
    ///
    /// The configured value is still multiplied by the responsive scale at
    /// draw time, so the hole keeps a fixed visual proportion when the
    /// viewport shrinks.
    Px(f64),
}

/// Options for the overlay drawn on top of the image slice.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayOptions {
    /// Whether the circular vignette is drawn at all.
    pub crosshair: bool,
    /// Radius of the vignette hole.
    pub radius: VignetteRadius,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            crosshair: true,
            radius: VignetteRadius::Auto,
        }
    }
}

impl OverlayOptions {
    /// Shallow-merges `patch` into these options.
    ///
    /// Fields left as `None` in the patch keep their current value.
    pub fn apply(&mut self, patch: OverlayPatch) {
        if let Some(crosshair) = patch.crosshair {
            self.crosshair = crosshair;
        }
        if let Some(radius) = patch.radius {
            self.radius = radius;
        }
    }
}

/// Partial update for [`OverlayOptions`].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayPatch {
    /// New value for [`OverlayOptions::crosshair`], if any.
    pub crosshair: Option<bool>,
    /// New value for [`OverlayOptions::radius`], if any.
    pub radius: Option<VignetteRadius>,
}

/// Returns the spacing between grid lines for the given target dimensions.
///
/// Computed from the unscaled target so that the grid has the same density
/// at every responsive scale.
#[must_use]
pub fn grid_increment(target: Size) -> f64 {
    (target.width + target.height) * GRID_SPACING_FACTOR
}

/// Returns the grid line offsets along one axis.
///
/// Offsets start at `step` and run up to (not including) `limit`. A
/// non-positive step yields no lines.
#[must_use]
pub fn grid_offsets(step: f64, limit: f64) -> GridOffsets {
    GridOffsets {
        next: step,
        step,
        limit,
    }
}

/// Iterator over grid line offsets, returned by [`grid_offsets`].
#[derive(Clone, Debug)]
pub struct GridOffsets {
    next: f64,
    step: f64,
    limit: f64,
}

impl Iterator for GridOffsets {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.step <= 0.0 || self.next >= self.limit {
            return None;
        }
        let offset = self.next;
        self.next += self.step;
        Some(offset)
    }
}

/// Returns the vignette hole for the given effective dimensions.
///
/// The hole is centered in the viewport. With [`VignetteRadius::Auto`] the
/// radius is proportional to the effective dimensions; an explicit radius is
/// multiplied by `responsive_scale` so it shrinks with the viewport.
#[must_use]
pub fn vignette_circle(effective: Size, responsive_scale: f64, radius: VignetteRadius) -> Circle {
    let r = match radius {
        VignetteRadius::Auto => (effective.width + effective.height) * AUTO_RADIUS_FACTOR,
        VignetteRadius::Px(px) => px * responsive_scale,
    };
    Circle::new(
        Point::new(effective.width / 2.0, effective.height / 2.0),
        r,
    )
}
