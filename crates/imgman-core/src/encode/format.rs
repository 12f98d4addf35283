//! Output format and encoder configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Encoded formats the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    /// MIME type used in data URLs.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        };
        f.write_str(name)
    }
}

/// Returned when a string names no known output format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown output format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    /// Accepts `jpeg`, `jpg`, `png`, `webp` (any case) and their MIME types.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" | "image/jpeg" => Ok(OutputFormat::Jpeg),
            "png" | "image/png" => Ok(OutputFormat::Png),
            "webp" | "image/webp" => Ok(OutputFormat::Webp),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Target format plus an optional, format-specific quality.
///
/// - JPEG: quality 1-100 (clamped). `None` uses the encoder default of 75.
/// - PNG: zlib-style compression level 0-9. `None` selects the encoder's
///   default compression.
/// - WebP: quality 0-100 (clamped) selects lossy encoding. `None` is lossless,
///   as is every quality when built without the `lossy-webp` feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    #[serde(default)]
    pub quality: Option<u8>,
}

impl OutputConfig {
    pub fn new(format: OutputFormat, quality: Option<u8>) -> Self {
        Self { format, quality }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert_eq!(OutputFormat::Webp.mime_type(), "image/webp");
    }

    #[test]
    fn test_parse_names_and_mimes() {
        assert_eq!("jpeg".parse(), Ok(OutputFormat::Jpeg));
        assert_eq!("JPG".parse(), Ok(OutputFormat::Jpeg));
        assert_eq!("image/png".parse(), Ok(OutputFormat::Png));
        assert_eq!(" webp ".parse(), Ok(OutputFormat::Webp));
        assert_eq!(
            "gif".parse::<OutputFormat>(),
            Err(UnknownFormat("gif".to_string()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        for format in [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::Webp] {
            assert_eq!(format.to_string().parse(), Ok(format));
        }
    }
}
