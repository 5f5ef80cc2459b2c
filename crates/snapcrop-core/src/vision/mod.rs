//! Image-processing collaborators.
//!
//! The editor never manipulates pixels itself. Cropping, preset filters and
//! watermark compositing are delegated to implementations of the traits in
//! this module, which lets a host plug in a native vision library. The
//! [`ImageOpsBackend`] implementation delegates to the `image` crate.
//!
//! # Contracts
//!
//! - Inputs are upright RGB images (see [`crate::decode::SourceImage::into_upright`])
//! - Outputs are new images, inputs are never modified
//! - A degenerate or out-of-bounds crop region is an error, never clamped

mod image_ops;
mod presets;

pub use image_ops::ImageOpsBackend;
pub use presets::{generate_previews, FilterPreset, FilterPreview};

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::geometry::{PixelRect, PixelSize};

/// Errors reported by image-processing collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VisionError {
    /// The input image has no pixels.
    #[error("Image is empty")]
    EmptyImage,

    /// The crop region is empty or extends past the image.
    #[error("Crop region {rect:?} does not fit inside a {size:?} image")]
    RegionOutOfBounds { rect: PixelRect, size: PixelSize },

    /// The pixel buffer length does not match the image dimensions.
    #[error("Pixel buffer does not match {width}x{height} RGB dimensions")]
    InvalidBuffer { width: u32, height: u32 },

    /// A filter preview could not be downscaled for the strip.
    #[error("Preview thumbnail failed: {0}")]
    Thumbnail(String),
}

/// Restricts a bitmap to a pixel region.
pub trait PixelCropper {
    /// Return a new image containing only `rect`.
    ///
    /// Fails with [`VisionError::RegionOutOfBounds`] for a degenerate region.
    fn crop(&self, image: &DecodedImage, rect: PixelRect) -> Result<DecodedImage, VisionError>;
}

/// The preset filters offered in the filter strip.
pub trait ImageFilters {
    fn grayscale(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError>;
    fn blur(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError>;
    /// Edge-preserving smoothing.
    fn bilateral(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError>;
    fn edge_detect(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError>;
    fn sharpen(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError>;
}

/// Composites a watermark onto a photo.
pub trait Watermarker {
    fn add_watermark(
        &self,
        image: &DecodedImage,
        watermark: &DecodedImage,
    ) -> Result<DecodedImage, VisionError>;
}
