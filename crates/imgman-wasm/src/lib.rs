//! imgman WASM - WebAssembly bindings for imgman
//!
//! This crate exposes the imgman-core pipeline to JavaScript/TypeScript, so
//! an upload can be oriented, downscaled and re-encoded before it leaves the
//! browser.
//!
//! # Module Structure
//!
//! - `pipeline` - The `ImgMan` class wrapping the core pipeline
//! - `types` - Argument conversion between JavaScript values and core types
//!
//! # Usage
//!
//! ```typescript
//! import init, { ImgMan } from '@imgman/wasm';
//!
//! await init();
//!
//! const img = ImgMan.fromBytes(new Uint8Array(await file.arrayBuffer()));
//! img.cacheMetadata();
//! img.rotateFromMetadata();
//! img.downscale(800);
//! img.output('jpeg', 80);
//! const dataUrl = img.toDataUrl();
//! ```

use wasm_bindgen::prelude::*;

mod pipeline;
mod types;

pub use pipeline::JsImgMan;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
