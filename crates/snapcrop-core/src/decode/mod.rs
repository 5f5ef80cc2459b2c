//! Image source: decoding photos and preparing preview thumbnails.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG photos along with their EXIF orientation
//! - Normalizing orientation to an upright pixel buffer
//! - Downscaling images for the filter preview strip
//!
//! # Examples
//!
//! ```ignore
//! use snapcrop_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap().into_upright();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod resize;
mod source;
mod types;

pub use resize::resize_to_fit;
pub use source::{decode_image, read_orientation};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, SourceImage};
