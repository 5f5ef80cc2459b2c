//! Downscaling for the filter preview strip.

use super::{DecodeError, DecodedImage, FilterType};

/// Scale an image so its longest edge is at most `max_edge`, keeping the aspect ratio.
///
/// Images that already fit are returned as a copy. Neither side of the
/// result is ever smaller than one pixel.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` when `max_edge` is zero and
/// `DecodeError::CorruptedFile` when the pixel buffer does not match the
/// image dimensions.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (width, height) = fit_dimensions(image.width, image.height, max_edge);
    let rgb = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("pixel buffer does not match dimensions".into()))?;

    let resized = image::imageops::resize(&rgb, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resized))
}

fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width >= height {
        let scaled = (height as f64 * max_edge as f64 / width as f64).round() as u32;
        (max_edge, scaled.max(1))
    } else {
        let scaled = (width as f64 * max_edge as f64 / height as f64).round() as u32;
        (scaled.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![128u8; (width * height * 3) as usize])
    }

    #[test]
    fn test_landscape_fits_long_edge() {
        let thumb = resize_to_fit(&gray_image(400, 200), 100, FilterType::Bilinear).unwrap();
        assert_eq!((thumb.width, thumb.height), (100, 50));
        assert_eq!(thumb.pixels.len(), 100 * 50 * 3);
    }

    #[test]
    fn test_portrait_fits_long_edge() {
        let thumb = resize_to_fit(&gray_image(150, 600), 120, FilterType::Nearest).unwrap();
        assert_eq!((thumb.width, thumb.height), (30, 120));
    }

    #[test]
    fn test_small_image_is_copied() {
        let img = gray_image(40, 30);
        let thumb = resize_to_fit(&img, 100, FilterType::Lanczos3).unwrap();
        assert_eq!(thumb, img);
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        let thumb = resize_to_fit(&gray_image(1000, 1), 10, FilterType::Bilinear).unwrap();
        assert_eq!((thumb.width, thumb.height), (10, 1));
    }

    #[test]
    fn test_zero_max_edge_is_an_error() {
        let result = resize_to_fit(&gray_image(10, 10), 0, FilterType::Bilinear);
        assert!(matches!(result, Err(DecodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_mismatched_buffer_is_an_error() {
        let broken = DecodedImage {
            width: 500,
            height: 500,
            pixels: vec![0u8; 10],
        };
        let result = resize_to_fit(&broken, 100, FilterType::Bilinear);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_fit_dimensions_zero_input() {
        assert_eq!(fit_dimensions(0, 100, 50), (0, 0));
    }
}
