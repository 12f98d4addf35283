//! Aspect-preserving downscaling.
//!
//! An image already inside both bounds is left alone, and nothing is ever
//! cropped. Resampling uses a smoothing filter by default.

use crate::decode::{FilterType, RawImage};

/// Compute the downscaled size of a `width` x `height` image for the given
/// bounds, or `None` when it already fits.
///
/// Landscape images (ratio > 1) take `max_width` and derive the height;
/// portrait and square images take `max_height` and derive the width.
/// Derived sides are rounded and never drop below 1.
///
/// Only the constrained side is guaranteed to equal its bound; the derived
/// side is not re-checked against the other bound, so a very wide `max_width`
/// with a small `max_height` may still leave a landscape image taller than
/// `max_height`.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    if width <= max_width && height <= max_height {
        return None;
    }

    let ratio = width as f64 / height as f64;

    if ratio > 1.0 {
        let new_height = (max_width as f64 / ratio).round() as u32;
        Some((max_width.max(1), new_height.max(1)))
    } else {
        let new_width = (max_height as f64 * ratio).round() as u32;
        Some((new_width.max(1), max_height.max(1)))
    }
}

/// Resize an image to exact dimensions.
///
/// Returns `None` for zero target dimensions or a pixel buffer that doesn't
/// match the image's dimensions.
pub fn resize_exact(
    image: &RawImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Option<RawImage> {
    if width == 0 || height == 0 {
        return None;
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Some(image.clone());
    }

    let view = image.as_view()?;
    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());
    Some(RawImage::from_rgb_image(resized))
}

/// Downscale `image` to fit the bounds, or return `None` when no resize is
/// needed (or possible).
pub fn downscale(
    image: &RawImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Option<RawImage> {
    let (width, height) = fit_within(image.width, image.height, max_width, max_height)?;
    resize_exact(image, width, height, filter)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
