//! Mapping between source-pixel space and the letterboxed display surface.
//!
//! The image is shown with a "contain" fit: it is scaled uniformly until one
//! axis fills the surface and centered on the other axis. [`map_image_to_display`]
//! computes where the image lands, [`map_display_to_image`] takes an overlay
//! rectangle drawn over it back to whole source pixels.
//!
//! # Example
//!
//! ```ignore
//! let display = map_image_to_display(PixelSize::new(4000, 3000), Rect::new(0.0, 0.0, 400.0, 400.0));
//! assert_eq!(display, Rect::new(0.0, 50.0, 400.0, 300.0));
//! ```

use thiserror::Error;

use crate::geometry::{PixelRect, PixelSize, Rect};
use crate::vision::VisionError;

/// Slack allowed when comparing a mapped extent against one pixel.
const PIXEL_EPSILON: f64 = 1e-9;

/// Errors raised while confirming a crop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CropError {
    /// The overlay maps to less than one source pixel on some axis.
    #[error("Invalid crop region: {width:.2}x{height:.2} pixels (minimum is 1x1), please try again")]
    InvalidCropRegion { width: f64, height: f64 },

    /// The pixel crop collaborator rejected the region.
    #[error("Crop failed: {0}")]
    Vision(#[from] VisionError),
}

/// Compute the rectangle the image occupies inside `surface`.
///
/// Aspect ratio is preserved with `scale = min(sw / iw, sh / ih)`. The axis
/// that limits the scale matches the surface exactly, the other one is
/// centered. Returns [`Rect::ZERO`] for an empty image or surface, which
/// callers treat as "no image loaded".
pub fn map_image_to_display(image_size: PixelSize, surface: Rect) -> Rect {
    let finite = [surface.x, surface.y, surface.width, surface.height]
        .iter()
        .all(|v| v.is_finite());
    if image_size.is_empty() || surface.is_empty() || !finite {
        return Rect::ZERO;
    }

    let iw = image_size.width as f64;
    let ih = image_size.height as f64;
    let scale_x = surface.width / iw;
    let scale_y = surface.height / ih;

    // Assign the limiting axis directly so it is not subject to rounding
    let (width, height) = if scale_x <= scale_y {
        (surface.width, ih * scale_x)
    } else {
        (iw * scale_y, surface.height)
    };

    Rect::new(
        surface.x + (surface.width - width) / 2.0,
        surface.y + (surface.height - height) / 2.0,
        width,
        height,
    )
}

/// Convert an overlay rectangle over `display` to source pixel coordinates.
///
/// The inverse scale is computed per axis. The result is intersected with the
/// image bounds and rounded to whole pixels, so it never has a negative origin
/// and never extends past the image.
///
/// # Errors
///
/// Returns [`CropError::InvalidCropRegion`] when the display rectangle is
/// degenerate or the clamped region is narrower or shorter than one pixel.
pub fn map_display_to_image(
    crop: Rect,
    display: Rect,
    image_size: PixelSize,
) -> Result<PixelRect, CropError> {
    if display.is_empty() || image_size.is_empty() {
        return Err(CropError::InvalidCropRegion {
            width: 0.0,
            height: 0.0,
        });
    }

    let iw = image_size.width as f64;
    let ih = image_size.height as f64;
    let scale_x = iw / display.width;
    let scale_y = ih / display.height;

    let left = (crop.x - display.x) * scale_x;
    let top = (crop.y - display.y) * scale_y;
    let right = left + crop.width * scale_x;
    let bottom = top + crop.height * scale_y;

    let left = left.clamp(0.0, iw);
    let top = top.clamp(0.0, ih);
    let right = right.min(iw);
    let bottom = bottom.min(ih);

    let width = right - left;
    let height = bottom - top;

    // NaN fails both comparisons, so test for the valid case
    if !(width >= 1.0 - PIXEL_EPSILON && height >= 1.0 - PIXEL_EPSILON) {
        return Err(CropError::InvalidCropRegion {
            width: width.max(0.0),
            height: height.max(0.0),
        });
    }

    // Keep at least one pixel on each axis after rounding
    let x = (left.round() as u32).min(image_size.width - 1);
    let y = (top.round() as u32).min(image_size.height - 1);
    let width = (right.round() as u32).min(image_size.width).saturating_sub(x).max(1);
    let height = (bottom.round() as u32).min(image_size.height).saturating_sub(y).max(1);

    Ok(PixelRect::new(x, y, width, height))
}

/// Project a pixel rectangle onto the display rectangle.
///
/// Forward counterpart of [`map_display_to_image`], used to restore an
/// overlay from a stored pixel region.
pub fn map_pixel_rect_to_display(rect: PixelRect, display: Rect, image_size: PixelSize) -> Rect {
    if image_size.is_empty() || display.is_empty() {
        return Rect::ZERO;
    }
    let scale_x = display.width / image_size.width as f64;
    let scale_y = display.height / image_size.height as f64;
    Rect::new(
        display.x + rect.x as f64 * scale_x,
        display.y + rect.y as f64 * scale_y,
        rect.width as f64 * scale_x,
        rect.height as f64 * scale_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit_has_no_letterbox() {
        let display = map_image_to_display(PixelSize::new(4000, 3000), Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(display, Rect::new(0.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn test_wide_image_is_centered_vertically() {
        let display = map_image_to_display(PixelSize::new(200, 100), Rect::new(10.0, 20.0, 300.0, 300.0));
        assert_eq!(display, Rect::new(10.0, 95.0, 300.0, 150.0));
    }

    #[test]
    fn test_tall_image_is_centered_horizontally() {
        let display = map_image_to_display(PixelSize::new(100, 400), Rect::new(0.0, 0.0, 300.0, 200.0));
        assert_eq!(display, Rect::new(125.0, 0.0, 50.0, 200.0));
    }

    #[test]
    fn test_small_image_is_scaled_up() {
        let display = map_image_to_display(PixelSize::new(10, 10), Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(display, Rect::new(25.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_degenerate_inputs_map_to_zero() {
        let surface = Rect::new(0.0, 0.0, 300.0, 200.0);
        assert_eq!(map_image_to_display(PixelSize::new(0, 100), surface), Rect::ZERO);
        assert_eq!(map_image_to_display(PixelSize::new(100, 0), surface), Rect::ZERO);
        assert_eq!(
            map_image_to_display(PixelSize::new(100, 100), Rect::new(0.0, 0.0, 0.0, 200.0)),
            Rect::ZERO
        );
        assert_eq!(
            map_image_to_display(PixelSize::new(100, 100), Rect::new(f64::NAN, 0.0, 10.0, 10.0)),
            Rect::ZERO
        );
        assert_eq!(
            map_image_to_display(PixelSize::new(100, 100), Rect::new(0.0, 0.0, f64::INFINITY, 10.0)),
            Rect::ZERO
        );
        assert_eq!(
            map_image_to_display(PixelSize::new(100, 100), Rect::new(0.0, 0.0, 10.0, f64::INFINITY)),
            Rect::ZERO
        );
    }

    #[test]
    fn test_inverse_scales_tenfold() {
        let rect = map_display_to_image(
            Rect::new(100.0, 75.0, 200.0, 150.0),
            Rect::new(0.0, 0.0, 400.0, 300.0),
            PixelSize::new(4000, 3000),
        )
        .unwrap();
        assert_eq!(rect, PixelRect::new(1000, 750, 2000, 1500));
    }

    #[test]
    fn test_inverse_accounts_for_display_origin() {
        let rect = map_display_to_image(
            Rect::new(95.0, 70.0, 150.0, 100.0),
            Rect::new(20.0, 20.0, 300.0, 200.0),
            PixelSize::new(600, 400),
        )
        .unwrap();
        assert_eq!(rect, PixelRect::new(150, 100, 300, 200));
    }

    #[test]
    fn test_inverse_clamps_negative_origin() {
        let rect = map_display_to_image(
            Rect::new(-10.0, -10.0, 60.0, 60.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            PixelSize::new(100, 100),
        )
        .unwrap();
        assert_eq!(rect, PixelRect::new(0, 0, 50, 50));
    }

    #[test]
    fn test_inverse_clamps_extent_to_image() {
        let rect = map_display_to_image(
            Rect::new(80.0, 90.0, 50.0, 50.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            PixelSize::new(200, 200),
        )
        .unwrap();
        assert_eq!(rect, PixelRect::new(160, 180, 40, 20));
    }

    #[test]
    fn test_sub_pixel_region_is_invalid() {
        let err = map_display_to_image(
            Rect::new(0.0, 0.0, 0.4, 0.4),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            PixelSize::new(100, 100),
        )
        .unwrap_err();
        assert!(matches!(err, CropError::InvalidCropRegion { .. }));
    }

    #[test]
    fn test_region_outside_image_is_invalid() {
        let err = map_display_to_image(
            Rect::new(150.0, 0.0, 40.0, 40.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            PixelSize::new(100, 100),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CropError::InvalidCropRegion {
                width: 0.0,
                height: 40.0
            }
        );
    }

    #[test]
    fn test_zero_display_is_invalid() {
        let err = map_display_to_image(
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::ZERO,
            PixelSize::new(100, 100),
        )
        .unwrap_err();
        assert!(matches!(err, CropError::InvalidCropRegion { .. }));
    }

    #[test]
    fn test_error_message_suggests_retry() {
        let err = CropError::InvalidCropRegion {
            width: 0.4,
            height: 0.4,
        };
        assert_eq!(
            err.to_string(),
            "Invalid crop region: 0.40x0.40 pixels (minimum is 1x1), please try again"
        );
    }

    #[test]
    fn test_forward_pixel_mapping() {
        let rect = map_pixel_rect_to_display(
            PixelRect::new(1000, 750, 2000, 1500),
            Rect::new(0.0, 0.0, 400.0, 300.0),
            PixelSize::new(4000, 3000),
        );
        assert_eq!(rect, Rect::new(100.0, 75.0, 200.0, 150.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    fn image_size_strategy() -> impl Strategy<Value = PixelSize> {
        (1u32..=8000, 1u32..=8000).prop_map(|(w, h)| PixelSize::new(w, h))
    }

    fn surface_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f64..500.0, -500.0f64..500.0, 1.0f64..2000.0, 1.0f64..2000.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        /// Property: The display rect lies inside the surface and fills one axis.
        #[test]
        fn prop_display_contained_and_fills_one_axis(
            size in image_size_strategy(),
            surface in surface_strategy(),
        ) {
            let display = map_image_to_display(size, surface);

            prop_assert!(surface.contains_rect(&display, EPS));
            prop_assert!(
                display.width == surface.width || display.height == surface.height,
                "Neither axis matches: {:?} in {:?}", display, surface
            );
        }

        /// Property: The display rect keeps the image's aspect ratio.
        #[test]
        fn prop_aspect_ratio_preserved(
            size in image_size_strategy(),
            surface in surface_strategy(),
        ) {
            let display = map_image_to_display(size, surface);
            let image_aspect = size.width as f64 / size.height as f64;
            let display_aspect = display.width / display.height;

            prop_assert!((image_aspect - display_aspect).abs() / image_aspect < 1e-9);
        }

        /// Property: Mapping the whole display rect back yields the whole image.
        #[test]
        fn prop_full_display_round_trips(
            size in image_size_strategy(),
            surface in surface_strategy(),
        ) {
            let display = map_image_to_display(size, surface);
            let rect = map_display_to_image(display, display, size).unwrap();

            prop_assert_eq!(rect, PixelRect::new(0, 0, size.width, size.height));
        }

        /// Property: A pixel rect projected onto the display and back is recovered within a pixel.
        #[test]
        fn prop_pixel_rect_round_trips(
            size in (50u32..=6000, 50u32..=6000).prop_map(|(w, h)| PixelSize::new(w, h)),
            surface in surface_strategy(),
            fractions in (0.0f64..0.9, 0.0f64..0.9, 0.05f64..1.0, 0.05f64..1.0),
        ) {
            let (fx, fy, fw, fh) = fractions;
            let x = (size.width as f64 * fx) as u32;
            let y = (size.height as f64 * fy) as u32;
            let w = ((size.width - x) as f64 * fw).max(1.0) as u32;
            let h = ((size.height - y) as f64 * fh).max(1.0) as u32;
            let original = PixelRect::new(x, y, w, h);

            let display = map_image_to_display(size, surface);
            let overlay = map_pixel_rect_to_display(original, display, size);
            let back = map_display_to_image(overlay, display, size).unwrap();

            prop_assert!((back.x as i64 - original.x as i64).abs() <= 1);
            prop_assert!((back.y as i64 - original.y as i64).abs() <= 1);
            prop_assert!((back.width as i64 - original.width as i64).abs() <= 1);
            prop_assert!((back.height as i64 - original.height as i64).abs() <= 1);
        }

        /// Property: Successful inverse mappings always fit inside the image.
        #[test]
        fn prop_inverse_stays_in_bounds(
            size in image_size_strategy(),
            crop in (-300.0f64..600.0, -300.0f64..600.0, 0.0f64..800.0, 0.0f64..800.0),
        ) {
            let display = Rect::new(0.0, 0.0, 400.0, 300.0);
            let (x, y, w, h) = crop;
            if let Ok(rect) = map_display_to_image(Rect::new(x, y, w, h), display, size) {
                prop_assert!(rect.fits_within(size), "{:?} escapes {:?}", rect, size);
            }
        }
    }
}
