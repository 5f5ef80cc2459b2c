//! Collaborator implementations backed by the `image` crate.

use image::{imageops, DynamicImage, GrayImage, Rgb, RgbImage};
use tracing::debug;

use super::{ImageFilters, PixelCropper, VisionError, Watermarker};
use crate::config::{FilterConfig, WatermarkConfig};
use crate::decode::DecodedImage;
use crate::geometry::PixelRect;

/// Crop, filter and watermark operations built on `image::imageops`.
#[derive(Debug, Clone, Default)]
pub struct ImageOpsBackend {
    filters: FilterConfig,
    watermark: WatermarkConfig,
}

impl ImageOpsBackend {
    pub fn new(filters: FilterConfig, watermark: WatermarkConfig) -> Self {
        Self { filters, watermark }
    }
}

fn to_rgb(image: &DecodedImage) -> Result<RgbImage, VisionError> {
    if image.is_empty() {
        return Err(VisionError::EmptyImage);
    }
    image.to_rgb_image().ok_or(VisionError::InvalidBuffer {
        width: image.width,
        height: image.height,
    })
}

fn gray_to_decoded(gray: GrayImage) -> DecodedImage {
    DecodedImage::from_rgb_image(DynamicImage::ImageLuma8(gray).into_rgb8())
}

impl PixelCropper for ImageOpsBackend {
    fn crop(&self, image: &DecodedImage, rect: PixelRect) -> Result<DecodedImage, VisionError> {
        let rgb = to_rgb(image)?;
        if !rect.fits_within(image.size()) {
            return Err(VisionError::RegionOutOfBounds {
                rect,
                size: image.size(),
            });
        }
        debug!(?rect, "cropping image");
        let cropped = imageops::crop_imm(&rgb, rect.x, rect.y, rect.width, rect.height).to_image();
        Ok(DecodedImage::from_rgb_image(cropped))
    }
}

impl ImageFilters for ImageOpsBackend {
    fn grayscale(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError> {
        let rgb = to_rgb(image)?;
        Ok(gray_to_decoded(imageops::grayscale(&rgb)))
    }

    fn blur(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError> {
        let rgb = to_rgb(image)?;
        Ok(DecodedImage::from_rgb_image(imageops::blur(
            &rgb,
            self.filters.blur_sigma,
        )))
    }

    fn bilateral(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError> {
        let rgb = to_rgb(image)?;
        Ok(DecodedImage::from_rgb_image(bilateral_filter(
            &rgb,
            self.filters.bilateral_radius,
            self.filters.bilateral_range_sigma,
        )))
    }

    fn edge_detect(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError> {
        let rgb = to_rgb(image)?;
        Ok(gray_to_decoded(sobel_magnitude(&imageops::grayscale(&rgb))))
    }

    fn sharpen(&self, image: &DecodedImage) -> Result<DecodedImage, VisionError> {
        let rgb = to_rgb(image)?;
        Ok(DecodedImage::from_rgb_image(imageops::unsharpen(
            &rgb,
            self.filters.sharpen_sigma,
            self.filters.sharpen_threshold,
        )))
    }
}

impl Watermarker for ImageOpsBackend {
    /// Blend the watermark into the bottom-right corner.
    ///
    /// Watermarks wider than `max_fraction` of the photo are scaled down
    /// first; whatever still overhangs the photo is clipped.
    fn add_watermark(
        &self,
        image: &DecodedImage,
        watermark: &DecodedImage,
    ) -> Result<DecodedImage, VisionError> {
        let mut base = to_rgb(image)?;
        let mut mark = to_rgb(watermark)?;

        let max_width = ((base.width() as f32 * self.watermark.max_fraction).round() as u32).max(1);
        if mark.width() > max_width {
            let height = ((mark.height() as u64 * max_width as u64) / mark.width() as u64).max(1) as u32;
            mark = imageops::resize(&mark, max_width, height, imageops::FilterType::Triangle);
        }

        let margin = self.watermark.margin;
        let left = base.width().saturating_sub(mark.width().saturating_add(margin));
        let top = base.height().saturating_sub(mark.height().saturating_add(margin));
        let alpha = self.watermark.opacity.clamp(0.0, 1.0);
        debug!(left, top, width = mark.width(), height = mark.height(), "compositing watermark");

        for (x, y, mark_px) in mark.enumerate_pixels() {
            let (bx, by) = (left + x, top + y);
            if bx >= base.width() || by >= base.height() {
                continue;
            }
            let base_px = base.get_pixel_mut(bx, by);
            for c in 0..3 {
                let blended = base_px[c] as f32 * (1.0 - alpha) + mark_px[c] as f32 * alpha;
                base_px[c] = blended.round().clamp(0.0, 255.0) as u8;
            }
        }

        Ok(DecodedImage::from_rgb_image(base))
    }
}

/// Edge-preserving smoothing: each pixel becomes an average of its
/// neighbourhood weighted by spatial distance and colour similarity.
fn bilateral_filter(src: &RgbImage, radius: u32, range_sigma: f32) -> RgbImage {
    let (w, h) = src.dimensions();
    let r = radius.max(1) as i64;
    let spatial_denom = 2.0 * (r as f32).powi(2);
    let range_denom = 2.0 * range_sigma.max(1.0).powi(2);

    RgbImage::from_fn(w, h, |x, y| {
        let center = src.get_pixel(x, y);
        let mut sum = [0.0f32; 3];
        let mut weight_sum = 0.0f32;

        for dy in -r..=r {
            let sy = (y as i64 + dy).clamp(0, h as i64 - 1) as u32;
            for dx in -r..=r {
                let sx = (x as i64 + dx).clamp(0, w as i64 - 1) as u32;
                let p = src.get_pixel(sx, sy);

                let color_dist: f32 = (0..3)
                    .map(|c| (p[c] as f32 - center[c] as f32).powi(2))
                    .sum();
                let spatial = ((dx * dx + dy * dy) as f32) / spatial_denom;
                let weight = (-spatial - color_dist / range_denom).exp();

                for c in 0..3 {
                    sum[c] += p[c] as f32 * weight;
                }
                weight_sum += weight;
            }
        }

        // The center pixel always contributes weight 1
        Rgb([
            (sum[0] / weight_sum).round().clamp(0.0, 255.0) as u8,
            (sum[1] / weight_sum).round().clamp(0.0, 255.0) as u8,
            (sum[2] / weight_sum).round().clamp(0.0, 255.0) as u8,
        ])
    })
}

/// Sobel gradient magnitude, normalized so the strongest edge is 255.
fn sobel_magnitude(gray: &GrayImage) -> GrayImage {
    let (w, h) = gray.dimensions();
    let at = |x: i64, y: i64| -> i32 {
        let cx = x.clamp(0, w as i64 - 1) as u32;
        let cy = y.clamp(0, h as i64 - 1) as u32;
        gray.get_pixel(cx, cy)[0] as i32
    };

    let mut magnitudes = vec![0u32; (w as usize) * (h as usize)];
    let mut max_mag = 0u32;
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let gx = -at(x - 1, y - 1) + at(x + 1, y - 1) - 2 * at(x - 1, y) + 2 * at(x + 1, y)
                - at(x - 1, y + 1)
                + at(x + 1, y + 1);
            let gy = -at(x - 1, y - 1) - 2 * at(x, y - 1) - at(x + 1, y - 1)
                + at(x - 1, y + 1)
                + 2 * at(x, y + 1)
                + at(x + 1, y + 1);
            let mag = gx.unsigned_abs() + gy.unsigned_abs();
            magnitudes[(y as usize) * (w as usize) + x as usize] = mag;
            max_mag = max_mag.max(mag);
        }
    }

    GrayImage::from_fn(w, h, |x, y| {
        if max_mag == 0 {
            return image::Luma([0]);
        }
        let mag = magnitudes[(y as usize) * (w as usize) + x as usize];
        image::Luma([((mag * 255) / max_mag) as u8])
    })
}
