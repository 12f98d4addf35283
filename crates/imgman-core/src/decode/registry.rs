//! MIME-keyed decoder table.
//!
//! Formats are sniffed from content, never from a file extension, and the
//! resulting MIME type selects a decode function. Adding a format means
//! registering one more entry; nothing in the pipeline changes.

use std::collections::BTreeMap;
use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, RawImage};

/// A decode function for one image format.
pub type DecodeFn = fn(&[u8]) -> Result<RawImage, DecodeError>;

/// Identify the MIME type of encoded image bytes by their magic numbers.
///
/// Returns `None` for anything the `image` crate cannot recognise,
/// including formats whose decoders are not compiled in.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

/// Table of decoders keyed by MIME type.
#[derive(Clone)]
pub struct DecoderRegistry {
    decoders: BTreeMap<String, DecodeFn>,
}

impl DecoderRegistry {
    /// An empty registry that decodes nothing.
    pub fn empty() -> Self {
        Self {
            decoders: BTreeMap::new(),
        }
    }

    /// Register `decoder` for `mime`, replacing any previous entry.
    pub fn register(&mut self, mime: impl Into<String>, decoder: DecodeFn) -> &mut Self {
        self.decoders.insert(mime.into(), decoder);
        self
    }

    /// Registered MIME types, in sorted order.
    pub fn mime_types(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(String::as_str)
    }

    /// Decode `bytes` with the decoder registered for `mime`.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnsupportedFormat` if no decoder is registered,
    /// or whatever the decoder itself reports.
    pub fn decode(&self, mime: &str, bytes: &[u8]) -> Result<RawImage, DecodeError> {
        let decoder = self
            .decoders
            .get(mime)
            .ok_or_else(|| DecodeError::UnsupportedFormat(mime.to_string()))?;
        decoder(bytes)
    }

    /// Sniff the format of `bytes`, then decode it.
    ///
    /// Returns the MIME type alongside the image so callers can log it.
    pub fn sniff_and_decode(&self, bytes: &[u8]) -> Result<(&'static str, RawImage), DecodeError> {
        let mime = sniff_mime(bytes).ok_or(DecodeError::UnrecognizedData)?;
        let image = self.decode(mime, bytes)?;
        Ok((mime, image))
    }
}

impl Default for DecoderRegistry {
    /// bmp, gif, png, jpeg and webp.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("image/bmp", decode_bmp)
            .register("image/gif", decode_gif)
            .register("image/png", decode_png)
            .register("image/jpeg", decode_jpeg)
            .register("image/webp", decode_webp);
        registry
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.decoders.keys()).finish()
    }
}

fn decode_with(bytes: &[u8], format: ImageFormat) -> Result<RawImage, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format);
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    Ok(RawImage::from_dynamic(img))
}

/// Decode a BMP image.
pub fn decode_bmp(bytes: &[u8]) -> Result<RawImage, DecodeError> {
    decode_with(bytes, ImageFormat::Bmp)
}

/// Decode the first frame of a GIF image.
pub fn decode_gif(bytes: &[u8]) -> Result<RawImage, DecodeError> {
    decode_with(bytes, ImageFormat::Gif)
}

/// Decode a PNG image.
pub fn decode_png(bytes: &[u8]) -> Result<RawImage, DecodeError> {
    decode_with(bytes, ImageFormat::Png)
}

/// Decode a JPEG image. EXIF orientation is NOT applied here.
pub fn decode_jpeg(bytes: &[u8]) -> Result<RawImage, DecodeError> {
    decode_with(bytes, ImageFormat::Jpeg)
}

/// Decode a WebP image.
pub fn decode_webp(bytes: &[u8]) -> Result<RawImage, DecodeError> {
    decode_with(bytes, ImageFormat::WebP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encode_fixture, gradient};

    #[test]
    fn test_sniff_mime() {
        let img = gradient(4, 4);
        assert_eq!(
            sniff_mime(&encode_fixture(&img, ImageFormat::Png)),
            Some("image/png")
        );
        assert_eq!(
            sniff_mime(&encode_fixture(&img, ImageFormat::Jpeg)),
            Some("image/jpeg")
        );
        assert_eq!(
            sniff_mime(&encode_fixture(&img, ImageFormat::Bmp)),
            Some("image/bmp")
        );
        assert_eq!(sniff_mime(b"hello, world"), None);
        assert_eq!(sniff_mime(&[]), None);
    }

    #[test]
    fn test_default_registry_formats() {
        let registry = DecoderRegistry::default();
        let types: Vec<&str> = registry.mime_types().collect();
        assert_eq!(
            types,
            vec!["image/bmp", "image/gif", "image/jpeg", "image/png", "image/webp"]
        );
    }

    #[test]
    fn test_decode_every_input_format() {
        let registry = DecoderRegistry::default();
        let img = gradient(12, 7);

        for format in [
            ImageFormat::Bmp,
            ImageFormat::Gif,
            ImageFormat::Png,
            ImageFormat::Jpeg,
            ImageFormat::WebP,
        ] {
            let bytes = encode_fixture(&img, format);
            let (mime, decoded) = registry
                .sniff_and_decode(&bytes)
                .unwrap_or_else(|e| panic!("{format:?} failed: {e}"));
            assert_eq!(mime, format.to_mime_type());
            assert_eq!(decoded.dimensions(), (12, 7), "{format:?}");
        }
    }

    #[test]
    fn test_lossless_decode_is_exact() {
        let registry = DecoderRegistry::default();
        let img = gradient(9, 5);
        let (_, decoded) = registry
            .sniff_and_decode(&encode_fixture(&img, ImageFormat::Png))
            .unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_unregistered_mime() {
        let registry = DecoderRegistry::empty();
        let bytes = encode_fixture(&gradient(2, 2), ImageFormat::Png);
        match registry.sniff_and_decode(&bytes) {
            Err(DecodeError::UnsupportedFormat(mime)) => assert_eq!(mime, "image/png"),
            other => panic!("Expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_data() {
        let registry = DecoderRegistry::default();
        let result = registry.sniff_and_decode(b"plain text, not an image");
        assert!(matches!(result, Err(DecodeError::UnrecognizedData)));
    }

    #[test]
    fn test_truncated_data_is_corrupted() {
        let registry = DecoderRegistry::default();
        let bytes = encode_fixture(&gradient(16, 16), ImageFormat::Png);
        let result = registry.sniff_and_decode(&bytes[..40]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_register_replaces_entry() {
        fn always_one_pixel(_: &[u8]) -> Result<RawImage, DecodeError> {
            Ok(RawImage::new(1, 1, vec![1, 2, 3]))
        }

        let mut registry = DecoderRegistry::default();
        registry.register("image/png", always_one_pixel);
        let bytes = encode_fixture(&gradient(8, 8), ImageFormat::Png);
        let (_, decoded) = registry.sniff_and_decode(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (1, 1));
        assert_eq!(registry.mime_types().count(), 5);
    }
}
