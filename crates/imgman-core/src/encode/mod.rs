//! Image encoding for imgman.
//!
//! This module provides functionality for:
//! - Encoding RGB8 images to JPEG (configurable quality), PNG (configurable
//!   compression) and lossless WebP
//! - The [`OutputConfig`] that selects format and quality
//!
//! # Examples
//!
//! ```ignore
//! use imgman_core::encode::{encode_image, OutputConfig, OutputFormat};
//!
//! let config = OutputConfig::new(OutputFormat::Jpeg, Some(85));
//! let jpeg_bytes = encode_image(&image, &config).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod encoder;
mod format;

pub use encoder::{encode_image, encode_jpeg, encode_png, encode_webp, png_compression, EncodeError};
pub use format::{OutputConfig, OutputFormat, UnknownFormat};
