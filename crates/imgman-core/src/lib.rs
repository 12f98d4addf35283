//! imgman Core - Image ingestion pipeline
//!
//! This crate takes a user-supplied image (raw bytes, a base64 data URL or a
//! file), optionally corrects its EXIF orientation, shrinks it to fit a
//! bounding box and re-encodes it as JPEG, PNG or WebP.
//!
//! The entry point is [`ImgMan`]; the modules below are usable on their own.

pub mod data_url;
pub mod decode;
pub mod encode;
mod error;
pub mod metadata;
pub mod pipeline;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_support;

pub use decode::{DecoderRegistry, FilterType, Orientation, RawImage};
pub use encode::{OutputConfig, OutputFormat};
pub use error::{ImgManError, Result};
pub use metadata::{ExifReader, Metadata, MetadataReader, MetadataValue};
pub use pipeline::{ImgMan, Source};
