// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Configured viewport dimensions plus the responsive scale applied to them.
///
/// The viewport is configured with target dimensions and then shrunk
/// isotropically to fit the width the host container actually provides. All
/// drawing and hit-testing use [`Viewport::effective_size`]; the target
/// dimensions themselves are never drawn directly, which keeps the aspect
/// ratio invariant across resizes.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    target: Size,
    scale: f64,
}

impl Viewport {
    /// Creates a viewport with the given target dimensions and scale 1.
    ///
    /// The dimensions are expected to be positive; callers validate their
    /// configuration before constructing a viewport.
    #[must_use]
    pub fn new(target: Size) -> Self {
        Self { target, scale: 1.0 }
    }

    /// Returns the configured target dimensions.
    #[must_use]
    pub fn target(&self) -> Size {
        self.target
    }

    /// Replaces the target dimensions.
    ///
    /// The responsive scale is left as-is until the next
    /// [`Viewport::recompute_scale`]; callers that change dimensions should
    /// recompute against their container before the next redraw.
    pub fn set_target(&mut self, target: Size) {
        self.target = target;
    }

    /// Returns the current responsive scale in `[0, 1]`.
    #[must_use]
    pub fn responsive_scale(&self) -> f64 {
        self.scale
    }

    /// Recomputes the responsive scale from the container width.
    ///
    /// The scale is `container_width / target.width`, capped at 1 so the
    /// viewport never upscales beyond its configured size. A zero-width
    /// container yields scale 0 and a degenerate (but harmless) render.
    /// This is the single source of truth for the effective render size and
    /// must run before every redraw that follows a layout change.
    pub fn recompute_scale(&mut self, container_width: f64) -> f64 {
        self.scale = (container_width / self.target.width).clamp(0.0, 1.0);
        self.scale
    }

    /// Returns the dimensions drawing should use: `target * scale`.
    ///
    /// Always derived on call, never cached, so it cannot go stale relative
    /// to the scale.
    #[must_use]
    pub fn effective_size(&self) -> Size {
        self.target * self.scale
    }

    /// Returns `target.width / target.height`.
    ///
    /// Scaling is isotropic, so this is also the aspect ratio of the
    /// effective size.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.target.width / self.target.height
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            target: self.target,
            responsive_scale: self.scale,
            effective: self.effective_size(),
            aspect_ratio: self.aspect_ratio(),
        }
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Configured target dimensions.
    pub target: Size,
    /// Current responsive scale.
    pub responsive_scale: f64,
    /// Effective (drawn) dimensions.
    pub effective: Size,
    /// Width over height of the target dimensions.
    pub aspect_ratio: f64,
}
