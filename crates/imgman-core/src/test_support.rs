//! Fixtures shared by the unit tests.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};

use crate::decode::RawImage;
use crate::metadata::{Metadata, MetadataError, MetadataReader, MetadataValue, ORIENTATION_TAG};

/// Deterministic RGB gradient; every pixel of a small image is distinct.
pub fn gradient(width: u32, height: u32) -> RawImage {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width.max(1)) as u8);
            pixels.push((y * 255 / height.max(1)) as u8);
            pixels.push(((x * 7 + y * 13) % 256) as u8);
        }
    }
    RawImage::new(width, height, pixels)
}

/// Encode `image` with the `image` crate's stock encoder for `format`.
pub fn encode_fixture(image: &RawImage, format: ImageFormat) -> Vec<u8> {
    let rgb = image.clone().into_rgb_image().unwrap();
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

/// Splice a minimal EXIF APP1 segment carrying only an orientation tag
/// right after the JPEG SOI marker.
pub fn with_exif_orientation(jpeg: &[u8], code: u16) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");

    let mut app1 = vec![0xFF, 0xE1, 0x00, 0x22];
    app1.extend_from_slice(b"Exif\0\0");
    // TIFF header, little endian, IFD0 at offset 8
    app1.extend_from_slice(b"II\x2A\x00");
    app1.extend_from_slice(&8u32.to_le_bytes());
    // one entry: Orientation, SHORT, count 1
    app1.extend_from_slice(&1u16.to_le_bytes());
    app1.extend_from_slice(&0x0112u16.to_le_bytes());
    app1.extend_from_slice(&3u16.to_le_bytes());
    app1.extend_from_slice(&1u32.to_le_bytes());
    app1.extend_from_slice(&code.to_le_bytes());
    app1.extend_from_slice(&[0, 0]);
    // no next IFD
    app1.extend_from_slice(&0u32.to_le_bytes());

    let mut out = Vec::with_capacity(jpeg.len() + app1.len());
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Reader that reports the same orientation for any source.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrientation(pub u32);

impl MetadataReader for FixedOrientation {
    fn read_bytes(&self, _bytes: &[u8]) -> Result<Metadata, MetadataError> {
        Ok([(ORIENTATION_TAG.to_string(), MetadataValue::Integer(self.0))]
            .into_iter()
            .collect())
    }

    fn read_file(&self, _path: &Path) -> Result<Metadata, MetadataError> {
        self.read_bytes(&[])
    }
}

/// Reader that always fails.
#[derive(Debug, Clone, Copy)]
pub struct FailingReader;

impl MetadataReader for FailingReader {
    fn read_bytes(&self, _bytes: &[u8]) -> Result<Metadata, MetadataError> {
        Err(MetadataError::Io(std::io::Error::other("metadata unavailable")))
    }

    fn read_file(&self, _path: &Path) -> Result<Metadata, MetadataError> {
        self.read_bytes(&[])
    }
}
