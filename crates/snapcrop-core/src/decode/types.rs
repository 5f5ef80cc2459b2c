//! Core types for decoded images.

use image::imageops;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::PixelSize;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// A requested output size has a zero side.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> imageops::FilterType {
        match self {
            FilterType::Nearest => imageops::FilterType::Nearest,
            FilterType::Bilinear => imageops::FilterType::Triangle,
            FilterType::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Upright, no transformation needed.
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// A decoded bitmap as supplied by the image source, with its EXIF orientation
/// not yet applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub image: DecodedImage,
    pub orientation: Orientation,
}

impl SourceImage {
    pub fn new(image: DecodedImage, orientation: Orientation) -> Self {
        Self { image, orientation }
    }

    /// Wrap a bitmap that is already upright.
    pub fn upright(image: DecodedImage) -> Self {
        Self::new(image, Orientation::Normal)
    }

    /// Size the image will have once upright.
    pub fn oriented_size(&self) -> PixelSize {
        if self.orientation.swaps_dimensions() {
            PixelSize::new(self.image.height, self.image.width)
        } else {
            self.image.size()
        }
    }

    /// Re-render to an upright pixel buffer.
    ///
    /// `Orientation::Normal` hands back the buffer untouched. A buffer whose
    /// length disagrees with its dimensions is also returned as-is.
    pub fn into_upright(self) -> DecodedImage {
        if self.orientation == Orientation::Normal {
            return self.image;
        }
        let Some(rgb) = self.image.to_rgb_image() else {
            return self.image;
        };
        let upright = match self.orientation {
            Orientation::Normal => rgb,
            Orientation::FlipHorizontal => imageops::flip_horizontal(&rgb),
            Orientation::Rotate180 => imageops::rotate180(&rgb),
            Orientation::FlipVertical => imageops::flip_vertical(&rgb),
            Orientation::Transpose => imageops::flip_horizontal(&imageops::rotate90(&rgb)),
            Orientation::Rotate90CW => imageops::rotate90(&rgb),
            Orientation::Transverse => imageops::flip_horizontal(&imageops::rotate270(&rgb)),
            Orientation::Rotate270CW => imageops::rotate270(&rgb),
        };
        DecodedImage::from_rgb_image(upright)
    }
}
