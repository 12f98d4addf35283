//! Conversions between JavaScript arguments and core types.
//!
//! These helpers stay free of `JsValue` so they can be tested natively;
//! the bindings convert their errors at the boundary.

use imgman_core::{FilterType, ImgManError, OutputConfig, OutputFormat};
use wasm_bindgen::JsValue;

/// Convert a core error into a JavaScript `Error`.
pub(crate) fn to_js_error(err: ImgManError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Validate downscale bounds passed as JavaScript numbers.
///
/// Zero and negative bounds are rejected.
pub(crate) fn downscale_bounds(
    max_width: i32,
    max_height: Option<i32>,
) -> Result<(u32, Option<u32>), ImgManError> {
    let positive = |value: i32| -> Result<u32, ImgManError> {
        u32::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| {
                ImgManError::InvalidArgument(format!("downscale bound must be positive, got {value}"))
            })
    };
    Ok((positive(max_width)?, max_height.map(positive).transpose()?))
}

/// Build an output configuration from a format name or MIME type.
pub(crate) fn output_config(format: &str, quality: Option<u8>) -> Result<OutputConfig, ImgManError> {
    let format: OutputFormat = format
        .parse()
        .map_err(|e: imgman_core::encode::UnknownFormat| ImgManError::InvalidArgument(e.to_string()))?;
    Ok(OutputConfig::new(format, quality))
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Lanczos3
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downscale_bounds() {
        assert_eq!(downscale_bounds(800, None).unwrap(), (800, None));
        assert_eq!(downscale_bounds(800, Some(600)).unwrap(), (800, Some(600)));
    }

    #[test]
    fn test_downscale_bounds_rejects_non_positive() {
        assert!(matches!(
            downscale_bounds(0, None),
            Err(ImgManError::InvalidArgument(_))
        ));
        assert!(matches!(
            downscale_bounds(-5, None),
            Err(ImgManError::InvalidArgument(_))
        ));
        assert!(matches!(
            downscale_bounds(100, Some(-1)),
            Err(ImgManError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_output_config() {
        assert_eq!(
            output_config("jpg", Some(80)).unwrap(),
            OutputConfig::new(OutputFormat::Jpeg, Some(80))
        );
        assert_eq!(
            output_config("image/webp", None).unwrap(),
            OutputConfig::new(OutputFormat::Webp, None)
        );
        assert!(matches!(
            output_config("tiff", None),
            Err(ImgManError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), FilterType::Nearest);
        assert_eq!(filter_from_u8(1), FilterType::Bilinear);
        assert_eq!(filter_from_u8(2), FilterType::Lanczos3);
        assert_eq!(filter_from_u8(255), FilterType::Bilinear);
    }
}
