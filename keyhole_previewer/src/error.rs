// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types, one per failure channel.
//!
//! Construction, image loading, and crop export fail in ways that call for
//! different handling, so each channel gets its own type: a caller retrying
//! a failed load cannot accidentally treat it like a configuration mistake.

use keyhole_viewport::EmptySourceError;
use thiserror::Error;

/// Invalid construction arguments.
///
/// Returned synchronously by [`crate::Previewer::new`] and
/// [`crate::Previewer::set_target_dimensions`]; the widget is not created,
/// or the change is not applied.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The configured width is zero, negative, or non-finite.
    #[error("viewport width must be a positive finite number, got {0}")]
    InvalidWidth(f64),
    /// The configured height is zero, negative, or non-finite.
    #[error("viewport height must be a positive finite number, got {0}")]
    InvalidHeight(f64),
}

/// A source image could not be loaded.
///
/// The previous image and crop state, if any, are left untouched so the
/// widget remains usable after a failed load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source bytes could not be decoded.
    #[error("failed to decode source image: {0}")]
    Decode(#[from] image::ImageError),
    /// The source decoded to zero width or height.
    #[error(transparent)]
    EmptySource(#[from] EmptySourceError),
}

/// The current crop could not be exported.
///
/// No partial output is ever produced: on error, nothing reaches the sink.
#[derive(Debug, Error)]
pub enum ExportError {
    /// There is no loaded image to export.
    #[error("no image loaded")]
    NoImage,
    /// The encoder failed to produce output.
    #[error("failed to encode crop: {0}")]
    Encode(#[from] image::ImageError),
    /// The save sink rejected the encoded bytes.
    #[error("failed to save crop: {0}")]
    Save(#[from] std::io::Error),
}
