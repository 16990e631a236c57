// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use keyhole_viewport::overlay::VignetteRadius;
use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Construction options for a [`crate::Previewer`].
///
/// `width` and `height` are the target viewport dimensions and are required;
/// the overlay fields default to a crosshair with an automatic radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewerConfig {
    /// Target viewport width in pixels. Must be positive and finite.
    pub width: f64,
    /// Target viewport height in pixels. Must be positive and finite.
    pub height: f64,
    /// Whether the circular vignette overlay is drawn.
    #[serde(default = "default_crosshair")]
    pub crosshair: bool,
    /// Radius of the vignette hole.
    #[serde(default)]
    pub radius: VignetteRadius,
}

impl PreviewerConfig {
    /// Creates a config with the given target dimensions and default
    /// overlay options.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            crosshair: default_crosshair(),
            radius: VignetteRadius::default(),
        }
    }

    /// Validates the configured dimensions, returning them as a size.
    pub(crate) fn validated_target(&self) -> Result<Size, ConfigError> {
        validate_dimensions(self.width, self.height)
    }
}

/// Checks that both dimensions are positive finite numbers.
pub(crate) fn validate_dimensions(width: f64, height: f64) -> Result<Size, ConfigError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(ConfigError::InvalidWidth(width));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(ConfigError::InvalidHeight(height));
    }
    Ok(Size::new(width, height))
}

fn default_crosshair() -> bool {
    true
}
