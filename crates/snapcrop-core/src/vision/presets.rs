//! The preset filters shown in the filter strip.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ImageFilters, VisionError};
use crate::decode::{resize_to_fit, DecodedImage, FilterType};

/// A preset filter, in the order the strip displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterPreset {
    #[default]
    Original,
    Grayscale,
    Blur,
    Bilateral,
    EdgeDetect,
    Sharpen,
}

impl FilterPreset {
    pub const ALL: [FilterPreset; 6] = [
        FilterPreset::Original,
        FilterPreset::Grayscale,
        FilterPreset::Blur,
        FilterPreset::Bilateral,
        FilterPreset::EdgeDetect,
        FilterPreset::Sharpen,
    ];

    /// Label shown under the preview.
    pub fn name(self) -> &'static str {
        match self {
            FilterPreset::Original => "Original",
            FilterPreset::Grayscale => "Grayscale",
            FilterPreset::Blur => "Blur",
            FilterPreset::Bilateral => "Bilateral",
            FilterPreset::EdgeDetect => "Edge Detect",
            FilterPreset::Sharpen => "Sharpen",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Run this preset through the filter collaborator. `Original` is a copy.
    pub fn apply<F: ImageFilters + ?Sized>(
        self,
        image: &DecodedImage,
        filters: &F,
    ) -> Result<DecodedImage, VisionError> {
        match self {
            FilterPreset::Original => Ok(image.clone()),
            FilterPreset::Grayscale => filters.grayscale(image),
            FilterPreset::Blur => filters.blur(image),
            FilterPreset::Bilateral => filters.bilateral(image),
            FilterPreset::EdgeDetect => filters.edge_detect(image),
            FilterPreset::Sharpen => filters.sharpen(image),
        }
    }
}

/// One entry of the filter strip.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPreview {
    pub preset: FilterPreset,
    /// Full-resolution result, shown when the preset is selected
    pub image: DecodedImage,
    /// Downscaled copy for the strip cell
    pub thumbnail: DecodedImage,
}

/// Apply every preset to `image`, producing one preview per preset.
pub fn generate_previews<F: ImageFilters + ?Sized>(
    image: &DecodedImage,
    filters: &F,
    thumbnail_edge: u32,
) -> Result<Vec<FilterPreview>, VisionError> {
    FilterPreset::ALL
        .iter()
        .map(|&preset| {
            let filtered = preset.apply(image, filters)?;
            let thumbnail = resize_to_fit(&filtered, thumbnail_edge.max(1), FilterType::Bilinear)
                .map_err(|err| {
                    warn!(filter = preset.name(), %err, "preview thumbnail failed");
                    VisionError::Thumbnail(err.to_string())
                })?;
            Ok(FilterPreview {
                preset,
                image: filtered,
                thumbnail,
            })
        })
        .collect()
}
