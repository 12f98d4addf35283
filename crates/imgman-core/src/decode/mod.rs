//! Image decoding for imgman.
//!
//! This module provides functionality for:
//! - Sniffing an encoded image's MIME type from its magic bytes
//! - Decoding BMP, GIF (first frame), PNG, JPEG and WebP into [`RawImage`]
//! - A MIME-keyed [`DecoderRegistry`] so callers can add or replace formats
//!
//! Decoding never applies EXIF orientation; that is an explicit pipeline
//! stage (see [`crate::transform::apply_orientation`]).
//!
//! # Examples
//!
//! ```ignore
//! use imgman_core::decode::DecoderRegistry;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let (mime, image) = DecoderRegistry::default().sniff_and_decode(&bytes).unwrap();
//! println!("Decoded {mime} {}x{}", image.width, image.height);
//! ```

mod registry;
mod types;

pub use registry::{
    decode_bmp, decode_gif, decode_jpeg, decode_png, decode_webp, sniff_mime, DecodeFn,
    DecoderRegistry,
};
pub use types::{DecodeError, FilterType, Orientation, RawImage};
