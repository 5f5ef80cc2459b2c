//! SnapCrop WASM - WebAssembly bindings for the SnapCrop editing screen
//!
//! This crate exposes snapcrop-core to a browser host.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Photo decoding with orientation correction
//! - `encode` - JPEG export
//! - `editor` - The editing session: crop overlay, filters, watermark
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsEditor } from '@snapcrop/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const editor = new JsEditor(decode_image(bytes));
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod encode;
mod types;

pub use decode::decode_image;
pub use editor::JsEditor;
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    snapcrop_core::VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
