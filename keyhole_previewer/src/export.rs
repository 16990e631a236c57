// Copyright 2026 the Keyhole Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crop export: encode the visible slice as JPEG and hand it to a sink.
//!
//! Export reads the shared decoded pixels directly; the on-screen surface is
//! not involved. The crop rectangle is snapped to whole source pixels, and
//! the same integers appear in the generated file name.

use std::fs;
use std::io;
use std::path::PathBuf;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage, imageops};
use keyhole_viewport::CropRegion;

use crate::error::ExportError;

/// Encoder quality on the 0–100 scale.
const JPEG_QUALITY: u8 = 88;

/// Stem used for generated file names.
const FILE_PREFIX: &str = "keyhole";

/// Destination for exported crops: the file-save side of the widget.
///
/// Implementations decide what "saving" means — writing to disk, handing
/// the bytes to a browser download, a test buffer. The sink only ever sees
/// fully encoded output.
pub trait SaveSink {
    /// Persists `bytes` under the suggested file name.
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<()>;
}

/// [`SaveSink`] that writes files into a fixed directory.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into `dir`.
    ///
    /// The directory is expected to exist; creation is left to the caller.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveSink for DirectorySink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.dir.join(file_name), bytes)
    }
}

/// Crop rectangle snapped to whole source pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Snaps the crop to whole pixels, clamped inside the source bounds with a
/// one-pixel floor so the encoder always has something to encode.
#[allow(
    clippy::cast_possible_truncation,
    reason = "values are rounded and clamped into u32 range before the cast"
)]
pub(crate) fn pixel_rect(crop: &CropRegion) -> PixelRect {
    let natural = crop.natural_size();
    let natural_w = natural.width.round().max(1.0) as u32;
    let natural_h = natural.height.round().max(1.0) as u32;

    let slice = crop.slice_size();
    let width = (slice.width.round().max(1.0) as u32).min(natural_w);
    let height = (slice.height.round().max(1.0) as u32).min(natural_h);

    let offset = crop.offset();
    let x = (offset.x.round().max(0.0) as u32).min(natural_w - width);
    let y = (offset.y.round().max(0.0) as u32).min(natural_h - height);

    PixelRect {
        x,
        y,
        width,
        height,
    }
}

/// Encodes the visible slice of `pixels` as a JPEG.
pub(crate) fn encode_jpeg(pixels: &RgbaImage, crop: &CropRegion) -> Result<Vec<u8>, ExportError> {
    let rect = pixel_rect(crop);
    let slice = imageops::crop_imm(pixels, rect.x, rect.y, rect.width, rect.height).to_image();
    // JPEG has no alpha channel; flatten before encoding.
    let rgb = DynamicImage::ImageRgba8(slice).to_rgb8();

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;
    tracing::debug!(len = bytes.len(), "encoded crop");
    Ok(bytes)
}

/// File name for the current crop: `keyhole-<width>X<height>.jpeg`, with
/// the slice dimensions in whole source pixels.
pub(crate) fn file_name(crop: &CropRegion) -> String {
    let rect = pixel_rect(crop);
    format!("{FILE_PREFIX}-{}X{}.jpeg", rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use keyhole_viewport::CropRegion;
    use kurbo::{Size, Vec2};

    use super::{PixelRect, file_name, pixel_rect};

    #[test]
    fn exact_crop_passes_through() {
        let crop = CropRegion::fit(Size::new(4000.0, 2000.0), Size::new(800.0, 800.0)).unwrap();
        assert_eq!(
            pixel_rect(&crop),
            PixelRect {
                x: 1000,
                y: 0,
                width: 2000,
                height: 2000
            }
        );
    }

    #[test]
    fn fractional_offsets_round_to_whole_pixels() {
        let mut crop = CropRegion::fit(Size::new(401.0, 200.0), Size::new(100.0, 100.0)).unwrap();
        crop.pan_by(Vec2::new(-0.3, 0.0));
        let rect = pixel_rect(&crop);
        assert_eq!(rect.width, 200);
        assert_eq!(rect.height, 200);
        assert!(rect.x + rect.width <= 401);
    }

    #[test]
    fn tiny_slices_keep_a_one_pixel_floor() {
        // A 1x400 source through a wide target leaves a sub-pixel slice
        // height; snapping must not collapse it to zero.
        let crop = CropRegion::fit(Size::new(1.0, 400.0), Size::new(300.0, 100.0)).unwrap();
        let rect = pixel_rect(&crop);
        assert!(rect.width >= 1);
        assert!(rect.height >= 1);
    }

    #[test]
    fn file_name_uses_slice_pixels() {
        let crop = CropRegion::fit(Size::new(4000.0, 2000.0), Size::new(800.0, 800.0)).unwrap();
        assert_eq!(file_name(&crop), "keyhole-2000X2000.jpeg");
    }
}
