//! JPEG, PNG and WebP encoding.
//!
//! All encoders take RGB8 pixel data as produced by the decode stage. JPEG,
//! PNG and lossless WebP use the `image` crate's pure-Rust codecs; lossy WebP
//! goes through libwebp (the `lossy-webp` feature).

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tracing::debug;

use super::{OutputConfig, OutputFormat};
use crate::decode::RawImage;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the buffer
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

fn write_with(
    encoder: impl ImageEncoder,
    format: OutputFormat,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), EncodeError> {
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format,
            message: e.to_string(),
        })
}

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100; `None` uses the encoder default (75).
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: Option<u8>,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = match quality {
        Some(q) => JpegEncoder::new_with_quality(&mut buffer, q.clamp(1, 100)),
        None => JpegEncoder::new(&mut buffer),
    };
    write_with(encoder, OutputFormat::Jpeg, pixels, width, height)?;

    Ok(buffer.into_inner())
}

/// Map a 0-9 compression level onto the PNG encoder's presets.
///
/// `None` is the "use the library default" sentinel.
pub fn png_compression(level: Option<u8>) -> CompressionType {
    match level {
        None => CompressionType::Default,
        Some(0..=3) => CompressionType::Fast,
        Some(4..=6) => CompressionType::Default,
        Some(_) => CompressionType::Best,
    }
}

/// Encode RGB pixel data to PNG bytes.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    level: Option<u8>,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, png_compression(level), PngFilter::Adaptive);
    write_with(encoder, OutputFormat::Png, pixels, width, height)?;

    Ok(buffer.into_inner())
}

/// Encode RGB pixel data to WebP bytes.
///
/// With a quality (0-100, clamped) the image is encoded lossy; without one
/// it is lossless. Builds without the `lossy-webp` feature are always
/// lossless.
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: Option<u8>,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    match quality {
        #[cfg(feature = "lossy-webp")]
        Some(quality) => encode_webp_lossy(pixels, width, height, quality),
        #[cfg(not(feature = "lossy-webp"))]
        Some(quality) => {
            debug!(quality, "built without lossy-webp, encoding webp losslessly");
            encode_webp_lossless(pixels, width, height)
        }
        None => encode_webp_lossless(pixels, width, height),
    }
}

#[cfg(feature = "lossy-webp")]
fn encode_webp_lossy(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let encoded = webp::Encoder::from_rgb(pixels, width, height)
        .encode_simple(false, f32::from(quality.min(100)))
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Webp,
            message: format!("{e:?}"),
        })?;
    Ok(encoded.to_vec())
}

fn encode_webp_lossless(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = WebPEncoder::new_lossless(&mut buffer);
    write_with(encoder, OutputFormat::Webp, pixels, width, height)?;

    Ok(buffer.into_inner())
}

/// Encode `image` according to `config`.
pub fn encode_image(image: &RawImage, config: &OutputConfig) -> Result<Vec<u8>, EncodeError> {
    let RawImage {
        width,
        height,
        pixels,
    } = image;

    let bytes = match config.format {
        OutputFormat::Jpeg => encode_jpeg(pixels, *width, *height, config.quality)?,
        OutputFormat::Png => encode_png(pixels, *width, *height, config.quality)?,
        OutputFormat::Webp => encode_webp(pixels, *width, *height, config.quality)?,
    };

    debug!(
        format = %config.format,
        quality = ?config.quality,
        width,
        height,
        bytes = bytes.len(),
        "encoded image"
    );
    Ok(bytes)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
