//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@snapcrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::{js_error, JsDecodedImage};
use snapcrop_core::decode::{self, DecodeError, DecodedImage};
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG photo, rotated upright according to its EXIF orientation.
///
/// # Errors
///
/// Throws if the bytes are not a supported image or the file is truncated.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode_upright(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

fn decode_upright(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    decode::decode_image(bytes).map(|source| source.into_upright())
}

/// Tests for decode bindings.
///
/// Functions returning `Result<T, JsValue>` only work on wasm32 targets, so
/// these exercise the native helper. See `snapcrop_core::decode` for the
/// decoder's own tests.
#[cfg(test)]
mod tests {
    use super::*;
    use snapcrop_core::encode::encode_jpeg;

    #[test]
    fn test_decode_upright_jpeg() {
        let jpeg = encode_jpeg(&vec![128u8; 24 * 16 * 3], 24, 16, 90).unwrap();
        let image = decode_upright(&jpeg).unwrap();
        assert_eq!((image.width, image.height), (24, 16));
    }

    #[test]
    fn test_decode_upright_rejects_garbage() {
        assert!(matches!(
            decode_upright(&[0, 1, 2, 3]),
            Err(DecodeError::InvalidFormat)
        ));
    }
}
