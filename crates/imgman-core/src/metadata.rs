//! EXIF metadata snapshots.
//!
//! Metadata must be read from the original encoded source: once a source is
//! decoded into a [`RawImage`](crate::decode::RawImage) it is gone. The
//! pipeline therefore reads it at most once and keeps the result as an
//! immutable [`Metadata`] snapshot.
//!
//! Reading is a capability ([`MetadataReader`]) so tests and hosts can supply
//! their own; [`ExifReader`] is the `kamadak-exif` implementation.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use exif::{Exif, In, Reader, Value};
use serde::Serialize;
use thiserror::Error;

use crate::data_url::DataUrlError;

/// Tag name of the EXIF orientation field.
pub const ORIENTATION_TAG: &str = "Orientation";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data URL error: {0}")]
    DataUrl(#[from] DataUrlError),
}

/// A single metadata value.
///
/// Only single unsigned integers are interpreted; everything else is kept as
/// the extractor's display text and passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Integer(u32),
    Text(String),
}

impl MetadataValue {
    pub fn as_integer(&self) -> Option<u32> {
        match self {
            MetadataValue::Integer(v) => Some(*v),
            MetadataValue::Text(_) => None,
        }
    }
}

/// Tag name to value mapping extracted from an image's primary IFD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, MetadataValue>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw EXIF orientation code, if present.
    ///
    /// Values outside 1-8 are returned as-is; interpreting them is up to the
    /// caller (see [`Orientation::from`](crate::decode::Orientation)).
    pub fn orientation(&self) -> Option<u32> {
        self.get(ORIENTATION_TAG)?.as_integer()
    }

    pub fn get(&self, tag: &str) -> Option<&MetadataValue> {
        self.entries.get(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, MetadataValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, MetadataValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Capability for extracting metadata from an encoded source.
pub trait MetadataReader {
    /// Read metadata from encoded image bytes.
    fn read_bytes(&self, bytes: &[u8]) -> Result<Metadata, MetadataError>;

    /// Read metadata from an image file.
    fn read_file(&self, path: &Path) -> Result<Metadata, MetadataError>;
}

/// [`MetadataReader`] backed by `kamadak-exif`.
///
/// The container is detected from content, so EXIF embedded in PNG
/// (`eXIf`), WebP and TIFF files is found as well as JPEG APP1.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl MetadataReader for ExifReader {
    fn read_bytes(&self, bytes: &[u8]) -> Result<Metadata, MetadataError> {
        let exif = Reader::new().read_from_container(&mut Cursor::new(bytes))?;
        Ok(collect_primary(&exif))
    }

    fn read_file(&self, path: &Path) -> Result<Metadata, MetadataError> {
        let mut reader = BufReader::new(File::open(path)?);
        let exif = Reader::new().read_from_container(&mut reader)?;
        Ok(collect_primary(&exif))
    }
}

fn collect_primary(exif: &Exif) -> Metadata {
    exif.fields()
        .filter(|field| field.ifd_num == In::PRIMARY)
        .map(|field| {
            let value = match &field.value {
                Value::Byte(v) if v.len() == 1 => MetadataValue::Integer(u32::from(v[0])),
                Value::Short(v) if v.len() == 1 => MetadataValue::Integer(u32::from(v[0])),
                Value::Long(v) if v.len() == 1 => MetadataValue::Integer(v[0]),
                _ => MetadataValue::Text(field.display_value().with_unit(exif).to_string()),
            };
            (field.tag.to_string(), value)
        })
        .collect()
}
