//! Default values for every configuration setting.

// ==========================================================================
// Crop Defaults
// ==========================================================================

/// Smallest width or height the crop overlay can be resized to (view units).
pub const DEFAULT_CROP_MIN_SIZE: f64 = 50.0;

/// Side length of the square resize handle on the bottom-right corner.
pub const DEFAULT_CROP_HANDLE_SIZE: f64 = 40.0;

/// Fraction of the display rectangle the initial overlay covers on each axis.
pub const DEFAULT_CROP_INITIAL_FRACTION: f64 = 0.5;

// ==========================================================================
// Filter Defaults
// ==========================================================================

/// Gaussian sigma for the blur preset.
pub const DEFAULT_BLUR_SIGMA: f32 = 2.5;

/// Neighbourhood radius of the bilateral preset.
pub const DEFAULT_BILATERAL_RADIUS: u32 = 3;

/// Range sigma of the bilateral preset; lower values keep edges sharper.
pub const DEFAULT_BILATERAL_RANGE_SIGMA: f32 = 25.0;

/// Unsharp-mask sigma for the sharpen preset.
pub const DEFAULT_SHARPEN_SIGMA: f32 = 1.0;

/// Unsharp-mask threshold for the sharpen preset.
pub const DEFAULT_SHARPEN_THRESHOLD: i32 = 2;

// ==========================================================================
// Watermark Defaults
// ==========================================================================

/// Distance in pixels between the watermark and the bottom-right corner.
pub const DEFAULT_WATERMARK_MARGIN: u32 = 16;

/// Watermark opacity (0.0 to 1.0).
pub const DEFAULT_WATERMARK_OPACITY: f32 = 0.6;

/// Largest fraction of the photo's width the watermark may cover.
pub const DEFAULT_WATERMARK_MAX_FRACTION: f32 = 0.25;

// ==========================================================================
// Export / Preview Defaults
// ==========================================================================

/// JPEG quality used when saving to the gallery.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Longest edge of the filter preview thumbnails.
pub const DEFAULT_THUMBNAIL_EDGE: u32 = 160;
