//! The one-screen editing session.
//!
//! [`EditorSession`] owns the photo being edited, the filter strip and the
//! crop overlay, and routes host input to them. Pixel work goes through a
//! backend implementing the [`crate::vision`] collaborator traits.

use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::crop::CropState;
use crate::decode::{DecodedImage, SourceImage};
use crate::gallery::{save_to_gallery, Gallery, SaveOutcome};
use crate::geometry::{Point, Rect};
use crate::mapping::map_image_to_display;
use crate::notice::Notice;
use crate::vision::{
    generate_previews, FilterPreset, FilterPreview, ImageFilters, ImageOpsBackend, PixelCropper,
    VisionError, Watermarker,
};

/// The view the image is drawn into.
pub trait DisplaySurface {
    /// Current bounds in view coordinates. Queried on every crop-mode entry.
    fn bounds(&self) -> Rect;
}

impl DisplaySurface for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// What the crop button did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropButtonOutcome {
    /// Crop mode was turned on.
    Entered,
    /// The image does not occupy any of the surface; crop mode stays off.
    Skipped,
    /// The photo was replaced by the cropped region.
    Cropped,
    /// Crop mode was left without cropping.
    Failed(Notice),
}

/// Editing state for a single photo.
pub struct EditorSession<B> {
    backend: B,
    config: EditorConfig,
    /// Unfiltered photo the previews are generated from
    base: DecodedImage,
    previews: Vec<FilterPreview>,
    selected: FilterPreset,
    filters_visible: bool,
    crop: CropState,
}

impl EditorSession<ImageOpsBackend> {
    /// Start a session with the `image`-crate backend, configured from `config`.
    pub fn with_image_ops(source: SourceImage, config: EditorConfig) -> Result<Self, VisionError> {
        let backend = ImageOpsBackend::new(config.filters.clone(), config.watermark.clone());
        Self::new(source, backend, config)
    }
}

impl<B: PixelCropper + ImageFilters + Watermarker> EditorSession<B> {
    /// Start editing `source`, normalizing it upright first.
    pub fn new(source: SourceImage, backend: B, config: EditorConfig) -> Result<Self, VisionError> {
        let base = source.into_upright();
        if base.is_empty() {
            return Err(VisionError::EmptyImage);
        }
        let previews = generate_previews(&base, &backend, config.preview.thumbnail_edge)?;
        debug!(width = base.width, height = base.height, "editor session started");

        Ok(Self {
            backend,
            config,
            base,
            previews,
            selected: FilterPreset::Original,
            filters_visible: false,
            crop: CropState::Idle,
        })
    }

    /// The photo as currently displayed, with the selected filter applied.
    pub fn image(&self) -> &DecodedImage {
        self.previews
            .iter()
            .find(|preview| preview.preset == self.selected)
            .map_or(&self.base, |preview| &preview.image)
    }

    pub fn previews(&self) -> &[FilterPreview] {
        &self.previews
    }

    pub fn selected_filter(&self) -> FilterPreset {
        self.selected
    }

    pub fn filters_visible(&self) -> bool {
        self.filters_visible
    }

    pub fn crop_state(&self) -> &CropState {
        &self.crop
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Resize handle of the overlay, if crop mode is on.
    pub fn resize_handle(&self) -> Option<Rect> {
        self.crop
            .active()
            .map(|active| active.resize_handle(&self.config.crop))
    }

    /// Show or hide the filter strip. Returns the new visibility.
    pub fn toggle_filters(&mut self) -> bool {
        self.filters_visible = !self.filters_visible;
        self.filters_visible
    }

    /// Display the preview at `index` in the strip. Out-of-range indices are ignored.
    pub fn select_filter(&mut self, index: usize) -> bool {
        match FilterPreset::from_index(index) {
            Some(preset) => {
                debug!(filter = preset.name(), "filter selected");
                self.selected = preset;
                true
            }
            None => false,
        }
    }

    /// Toggle crop mode: enter it over the displayed image, or confirm the
    /// current overlay.
    pub fn crop_button<S: DisplaySurface + ?Sized>(&mut self, surface: &S) -> CropButtonOutcome {
        if !self.crop.is_active() {
            let display = map_image_to_display(self.image().size(), surface.bounds());
            if display == Rect::ZERO {
                warn!(surface = ?surface.bounds(), "no image on the display surface, crop skipped");
                return CropButtonOutcome::Skipped;
            }
            self.crop = self.crop.enter_crop_mode(display, &self.config.crop);
            return CropButtonOutcome::Entered;
        }

        let (next, result) = self.crop.confirm_crop(self.image(), &self.backend);
        self.crop = next;
        match result {
            Ok(cropped) => match self.replace_base(cropped) {
                Ok(()) => CropButtonOutcome::Cropped,
                Err(err) => CropButtonOutcome::Failed(Notice::new("Invalid Crop", err.to_string())),
            },
            Err(err) => CropButtonOutcome::Failed(Notice::new("Invalid Crop", err.to_string())),
        }
    }

    /// Leave crop mode without cropping.
    pub fn cancel_crop(&mut self) {
        self.crop = self.crop.cancel();
    }

    pub fn touch_start(&mut self, point: Point) {
        self.crop = self.crop.touch_start(point, &self.config.crop);
    }

    pub fn touch_move(&mut self, point: Point) {
        self.crop = self.crop.touch_move(point, &self.config.crop);
    }

    pub fn touch_end(&mut self) {
        self.crop = self.crop.touch_end();
    }

    /// Composite `watermark` onto the displayed photo.
    pub fn add_watermark(&mut self, watermark: &DecodedImage) -> Result<(), VisionError> {
        let marked = self.backend.add_watermark(self.image(), watermark)?;
        self.replace_base(marked)
    }

    /// Save the displayed photo to `gallery`.
    pub fn save<G: Gallery + ?Sized>(&self, gallery: &G) -> SaveOutcome {
        save_to_gallery(self.image(), gallery, self.config.export.jpeg_quality)
    }

    /// Make `image` the new unfiltered photo. The filter selection returns to
    /// `Original` since the old previews no longer apply.
    fn replace_base(&mut self, image: DecodedImage) -> Result<(), VisionError> {
        let previews = generate_previews(&image, &self.backend, self.config.preview.thumbnail_edge)?;
        self.base = image;
        self.previews = previews;
        self.selected = FilterPreset::Original;
        Ok(())
    }
}
