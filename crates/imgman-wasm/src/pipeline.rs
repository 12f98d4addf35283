//! The `ImgMan` class for JavaScript.
//!
//! Methods mirror the core pipeline stage for stage. JavaScript has no
//! `&mut self` chaining, so stages return nothing and are called in sequence
//! on the same object.

use imgman_core::ImgMan;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{downscale_bounds, filter_from_u8, output_config, to_js_error};

/// An image pipeline handle.
///
/// Pixel data stays in WASM memory until `toBytes()` or `toDataUrl()` copies
/// the encoded result out.
#[wasm_bindgen(js_name = ImgMan)]
pub struct JsImgMan {
    inner: ImgMan,
}

#[wasm_bindgen(js_class = ImgMan)]
impl JsImgMan {
    /// Start from encoded image bytes (e.g. a `File`'s `arrayBuffer()`).
    #[wasm_bindgen(js_name = fromBytes)]
    pub fn from_bytes(bytes: Vec<u8>) -> JsImgMan {
        JsImgMan {
            inner: ImgMan::from_bytes(bytes),
        }
    }

    /// Start from a `data:` URL, e.g. `FileReader.readAsDataURL` output.
    #[wasm_bindgen(js_name = fromDataUrl)]
    pub fn from_data_url(data_url: String) -> JsImgMan {
        JsImgMan {
            inner: ImgMan::from_data_url(data_url),
        }
    }

    /// Read EXIF metadata from the original bytes. Call before any pixel stage.
    #[wasm_bindgen(js_name = cacheMetadata)]
    pub fn cache_metadata(&mut self) -> Result<(), JsValue> {
        self.inner.cache_metadata().map_err(to_js_error)?;
        Ok(())
    }

    /// Correct the image for its EXIF orientation tag, if any.
    #[wasm_bindgen(js_name = rotateFromMetadata)]
    pub fn rotate_from_metadata(&mut self) -> Result<(), JsValue> {
        self.inner.rotate_from_metadata().map_err(to_js_error)?;
        Ok(())
    }

    /// Shrink to fit `maxWidth` x `maxHeight` (defaults to `maxWidth`).
    pub fn downscale(&mut self, max_width: i32, max_height: Option<i32>) -> Result<(), JsValue> {
        let (max_width, max_height) = downscale_bounds(max_width, max_height).map_err(to_js_error)?;
        self.inner
            .downscale(max_width, max_height)
            .map_err(to_js_error)?;
        Ok(())
    }

    /// `downscale` with an explicit filter: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
    #[wasm_bindgen(js_name = downscaleWithFilter)]
    pub fn downscale_with_filter(
        &mut self,
        max_width: i32,
        max_height: Option<i32>,
        filter: u8,
    ) -> Result<(), JsValue> {
        let (max_width, max_height) = downscale_bounds(max_width, max_height).map_err(to_js_error)?;
        self.inner
            .downscale_with_filter(max_width, max_height, filter_from_u8(filter))
            .map_err(to_js_error)?;
        Ok(())
    }

    /// Select the output format (`"jpeg"`, `"png"`, `"webp"` or a MIME type)
    /// and optional quality.
    pub fn output(&mut self, format: &str, quality: Option<u8>) -> Result<(), JsValue> {
        let config = output_config(format, quality).map_err(to_js_error)?;
        self.inner.set_output(config);
        Ok(())
    }

    /// Select the output from a `{ format, quality? }` object.
    #[wasm_bindgen(js_name = outputConfig)]
    pub fn output_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: imgman_core::OutputConfig =
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.set_output(config);
        Ok(())
    }

    /// Encode in the configured output format.
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, JsValue> {
        self.inner.to_bytes().map_err(to_js_error)
    }

    /// Encode as a base64 `data:` URL.
    #[wasm_bindgen(js_name = toDataUrl)]
    pub fn to_data_url(&mut self) -> Result<String, JsValue> {
        self.inner.to_data_url().map_err(to_js_error)
    }

    /// The cached EXIF orientation code, if metadata was cached and has one.
    pub fn orientation(&self) -> Option<u32> {
        self.inner.metadata().and_then(|m| m.orientation())
    }

    /// The cached metadata as a plain `{ tag: value }` object, or `undefined`
    /// before `cacheMetadata()`.
    pub fn metadata(&self) -> Result<JsValue, JsValue> {
        match self.inner.metadata() {
            Some(metadata) => metadata
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Current width in pixels (decodes the source if needed).
    pub fn width(&mut self) -> Result<u32, JsValue> {
        self.inner
            .dimensions()
            .map(|(width, _)| width)
            .map_err(to_js_error)
    }

    /// Current height in pixels (decodes the source if needed).
    pub fn height(&mut self) -> Result<u32, JsValue> {
        self.inner
            .dimensions()
            .map(|(_, height)| height)
            .map_err(to_js_error)
    }
}
