//! Source descriptors and the unresolved/resolved image state.

use std::path::PathBuf;

use tracing::debug;

use crate::data_url;
use crate::decode::{DecodeError, DecoderRegistry, RawImage};
use crate::error::{ImgManError, Result};

/// Where an image comes from, before it has been decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Encoded image bytes; the format is sniffed from content.
    Bytes(Vec<u8>),
    /// A `data:<mime>;base64,<payload>` string.
    DataUrl(String),
    /// Path to an image file; the format is sniffed from content, not the extension.
    File(PathBuf),
}

impl Source {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Bytes(_) => "bytes",
            Source::DataUrl(_) => "data-url",
            Source::File(_) => "file",
        }
    }

    /// Decode this source through `decoders`.
    ///
    /// Byte and data-URL sources that aren't recognisable images fail as
    /// `DecodeFailed`. A file whose content matches no registered decoder
    /// fails as `UnsupportedFormat`, whatever its extension says.
    pub(crate) fn decode(&self, decoders: &DecoderRegistry) -> Result<RawImage> {
        match self {
            Source::Bytes(bytes) => Ok(decoders.sniff_and_decode(bytes)?.1),
            Source::DataUrl(url) => {
                let bytes = data_url::decode(url)?;
                let (sniffed, image) = decoders.sniff_and_decode(&bytes)?;
                if let Some(declared) = data_url::mime_type(url).filter(|m| *m != sniffed) {
                    debug!(declared, sniffed, "data URL header disagrees with content, using content");
                }
                Ok(image)
            }
            Source::File(path) => {
                let bytes = std::fs::read(path)?;
                match decoders.sniff_and_decode(&bytes) {
                    Ok((_, image)) => Ok(image),
                    Err(DecodeError::UnrecognizedData) => Err(ImgManError::UnsupportedFormat(
                        format!("{} is not a recognized image file", path.display()),
                    )),
                    Err(err) => Err(err.into()),
                }
            }
        }
    }
}

/// Lazy decode state: the source is held until something needs pixels,
/// then replaced by the decoded image.
#[derive(Debug)]
pub(crate) enum ImageState {
    Unresolved(Source),
    Resolved(RawImage),
}
