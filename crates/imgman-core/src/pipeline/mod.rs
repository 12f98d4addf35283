//! The chainable image pipeline.
//!
//! An [`ImgMan`] holds one image through its lifecycle:
//!
//! ```text
//! source ──(first pixel access)──▶ decoded image ──▶ transforms ──▶ encoded output
//! ```
//!
//! Decoding is deferred until a stage needs pixels. Once decoded, the source
//! bytes are dropped and every later stage works on the decoded image, so
//! metadata has to be cached from the source before that happens if it is
//! wanted. Configuring the output never touches the image.
//!
//! # Examples
//!
//! ```ignore
//! use imgman_core::{ImgMan, OutputFormat};
//!
//! let mut img = ImgMan::from_file("upload.jpg");
//! let jpeg = img
//!     .cache_metadata()?
//!     .rotate_from_metadata()?
//!     .downscale(800, None)?
//!     .output(OutputFormat::Jpeg, Some(80))
//!     .to_bytes()?;
//! ```

mod source;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

pub use source::Source;
use source::ImageState;

use crate::data_url;
use crate::decode::{DecoderRegistry, FilterType, Orientation, RawImage};
use crate::encode::{encode_image, OutputConfig, OutputFormat};
use crate::error::{ImgManError, Result};
use crate::metadata::{ExifReader, Metadata, MetadataError, MetadataReader};
use crate::transform;

/// A single image moving through ingest, transform and output.
pub struct ImgMan {
    state: Option<ImageState>,
    /// Set for file sources; the default `to_file` destination and a way
    /// back to the original bytes for metadata after decoding.
    origin_path: Option<PathBuf>,
    metadata: Option<Metadata>,
    output: Option<OutputConfig>,
    decoders: DecoderRegistry,
    reader: Box<dyn MetadataReader>,
}

impl ImgMan {
    /// An empty pipeline. Every operation that needs an image fails with
    /// `NotInitialized` until a source is supplied.
    pub fn new() -> Self {
        Self {
            state: None,
            origin_path: None,
            metadata: None,
            output: None,
            decoders: DecoderRegistry::default(),
            reader: Box::new(ExifReader),
        }
    }

    pub fn from_source(source: Source) -> Self {
        let origin_path = match &source {
            Source::File(path) => Some(path.clone()),
            Source::Bytes(_) | Source::DataUrl(_) => None,
        };
        Self {
            state: Some(ImageState::Unresolved(source)),
            origin_path,
            ..Self::new()
        }
    }

    /// Encoded image bytes of any registered format.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_source(Source::Bytes(bytes.into()))
    }

    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        Self::from_source(Source::DataUrl(data_url.into()))
    }

    /// An image file. Nothing is read until the first stage that needs it.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::from_source(Source::File(path.into()))
    }

    /// An already-decoded image. It has no encoded source, so its metadata
    /// is empty. A pixel buffer that doesn't match the dimensions fails the
    /// first stage that needs pixels with `InvalidArgument`.
    pub fn from_image(image: RawImage) -> Self {
        Self {
            state: Some(ImageState::Resolved(image)),
            metadata: Some(Metadata::default()),
            ..Self::new()
        }
    }

    /// Replace the decoder table used for the first decode.
    pub fn with_decoders(mut self, decoders: DecoderRegistry) -> Self {
        self.decoders = decoders;
        self
    }

    /// Replace the metadata extractor.
    pub fn with_metadata_reader(mut self, reader: impl MetadataReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Whether the source has been decoded.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, Some(ImageState::Resolved(_)))
    }

    /// The cached metadata snapshot, if `cache_metadata` has run.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn output_config(&self) -> Option<&OutputConfig> {
        self.output.as_ref()
    }

    /// Decode the source if that hasn't happened yet and return the image.
    ///
    /// The source is decoded at most once. On failure the pipeline keeps its
    /// unresolved source.
    pub fn resolve(&mut self) -> Result<&RawImage> {
        self.resolve_mut().map(|image| &*image)
    }

    fn resolve_mut(&mut self) -> Result<&mut RawImage> {
        if let Some(ImageState::Unresolved(source)) = &self.state {
            let image = source.decode(&self.decoders)?;
            debug!(
                source = source.kind(),
                width = image.width,
                height = image.height,
                "decoded source image"
            );
            // Drops the encoded source.
            self.state = Some(ImageState::Resolved(image));
        }

        match &mut self.state {
            Some(ImageState::Resolved(image)) if !image.is_consistent() => {
                Err(ImgManError::InvalidArgument(format!(
                    "pixel buffer holds {} bytes, a {}x{} RGB image needs {}",
                    image.pixels.len(),
                    image.width,
                    image.height,
                    image.pixel_count() * 3
                )))
            }
            Some(ImageState::Resolved(image)) => Ok(image),
            Some(ImageState::Unresolved(_)) | None => {
                Err(ImgManError::NotInitialized("no image source was provided"))
            }
        }
    }

    /// Current `(width, height)`, decoding the source if needed.
    pub fn dimensions(&mut self) -> Result<(u32, u32)> {
        self.resolve().map(RawImage::dimensions)
    }

    /// Read metadata from the original source and keep it.
    ///
    /// Runs at most once; later calls keep the first snapshot. A source with
    /// no readable metadata yields an empty snapshot rather than an error.
    /// Must be called before the first pixel stage for byte and data-URL
    /// sources, since their encoded form is gone after decoding.
    pub fn cache_metadata(&mut self) -> Result<&mut Self> {
        if self.metadata.is_some() {
            return Ok(self);
        }

        let extracted = match (&self.state, &self.origin_path) {
            (None, _) => return Err(ImgManError::NotInitialized("no image source was provided")),
            (Some(ImageState::Unresolved(Source::Bytes(bytes))), _) => {
                self.reader.read_bytes(bytes)
            }
            (Some(ImageState::Unresolved(Source::DataUrl(url))), _) => data_url::decode(url)
                .map_err(MetadataError::from)
                .and_then(|bytes| self.reader.read_bytes(&bytes)),
            (Some(ImageState::Unresolved(Source::File(path))), _)
            | (Some(ImageState::Resolved(_)), Some(path)) => self.reader.read_file(path),
            (Some(ImageState::Resolved(_)), None) => {
                return Err(ImgManError::NotInitialized(
                    "the original source was already decoded, cache metadata first",
                ))
            }
        };

        let metadata = extracted.unwrap_or_else(|err| {
            debug!(error = %err, "no readable metadata, continuing with none");
            Metadata::default()
        });
        debug!(
            tags = metadata.len(),
            orientation = ?metadata.orientation(),
            "cached metadata"
        );
        self.metadata = Some(metadata);
        Ok(self)
    }

    /// Rotate and/or flip the image so it displays upright, according to
    /// the cached orientation tag.
    ///
    /// Caches metadata first if needed. Without a tag, or with code 1 or an
    /// unknown code, the image is left untouched and nothing is decoded.
    pub fn rotate_from_metadata(&mut self) -> Result<&mut Self> {
        if self.metadata.is_none() {
            self.cache_metadata()?;
        }

        let Some(code) = self.metadata.as_ref().and_then(Metadata::orientation) else {
            debug!("no orientation tag, skipping rotation");
            return Ok(self);
        };
        let orientation = Orientation::from(code);
        if orientation.is_identity() {
            debug!(code, "orientation needs no correction");
            return Ok(self);
        }

        let image = self.resolve_mut()?;
        *image = transform::apply_orientation(image, orientation);
        debug!(code, ?orientation, "corrected orientation");
        Ok(self)
    }

    /// Shrink the image to fit `max_width` x `max_height` (height defaults to
    /// the width bound), keeping its aspect ratio. Images already inside the
    /// bounds are left alone.
    pub fn downscale(&mut self, max_width: u32, max_height: Option<u32>) -> Result<&mut Self> {
        self.downscale_with_filter(max_width, max_height, FilterType::default())
    }

    /// [`downscale`](Self::downscale) with an explicit resampling filter.
    pub fn downscale_with_filter(
        &mut self,
        max_width: u32,
        max_height: Option<u32>,
        filter: FilterType,
    ) -> Result<&mut Self> {
        let max_height = max_height.unwrap_or(max_width);
        if max_width == 0 || max_height == 0 {
            return Err(ImgManError::InvalidArgument(format!(
                "downscale bounds must be positive, got {max_width}x{max_height}"
            )));
        }

        let image = self.resolve_mut()?;
        let before = image.dimensions();
        if let Some(resized) = transform::downscale(image, max_width, max_height, filter) {
            debug!(
                from = ?before,
                to = ?resized.dimensions(),
                ?filter,
                "downscaled image"
            );
            *image = resized;
        }
        Ok(self)
    }

    /// Select the output format and quality for later materialization.
    ///
    /// Only configuration; the image is neither decoded nor encoded. The
    /// latest call wins.
    pub fn output(&mut self, format: OutputFormat, quality: Option<u8>) -> &mut Self {
        self.set_output(OutputConfig::new(format, quality))
    }

    pub fn set_output(&mut self, config: OutputConfig) -> &mut Self {
        self.output = Some(config);
        self
    }

    fn encode_output(&mut self) -> Result<(OutputConfig, Vec<u8>)> {
        let config = self.output.ok_or(ImgManError::OutputNotConfigured)?;
        let image = self.resolve()?;
        let bytes = encode_image(image, &config)?;
        Ok((config, bytes))
    }

    /// Encode the image in the configured output format.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.encode_output().map(|(_, bytes)| bytes)
    }

    /// Encode the image as a `data:<mime>;base64,...` string.
    pub fn to_data_url(&mut self) -> Result<String> {
        let (config, bytes) = self.encode_output()?;
        Ok(data_url::encode(config.format.mime_type(), &bytes))
    }

    /// Encode the image and write it to `path`, or back over the source file
    /// when `path` is `None`. An existing file is overwritten.
    pub fn to_file(&mut self, path: Option<&Path>) -> Result<()> {
        if self.output.is_none() {
            return Err(ImgManError::OutputNotConfigured);
        }
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.origin_path.clone().ok_or_else(|| {
                ImgManError::InvalidArgument(
                    "no output path given and the source was not a file".to_string(),
                )
            })?,
        };

        let (_, bytes) = self.encode_output()?;
        std::fs::write(&path, &bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote image file");
        Ok(())
    }

    /// Take the decoded image out of the pipeline.
    pub fn into_image(mut self) -> Result<RawImage> {
        self.resolve_mut()?;
        match self.state {
            Some(ImageState::Resolved(image)) => Ok(image),
            _ => Err(ImgManError::NotInitialized("no image source was provided")),
        }
    }
}

impl Default for ImgMan {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ImgMan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            None => "empty".to_string(),
            Some(ImageState::Unresolved(source)) => format!("unresolved {}", source.kind()),
            Some(ImageState::Resolved(image)) => {
                format!("resolved {}x{}", image.width, image.height)
            }
        };
        f.debug_struct("ImgMan")
            .field("state", &state)
            .field("origin_path", &self.origin_path)
            .field("metadata", &self.metadata)
            .field("output", &self.output)
            .field("decoders", &self.decoders)
            .finish_non_exhaustive()
    }
}
