//! Editing-screen bindings.
//!
//! `JsEditor` wraps an [`EditorSession`] for a browser host. The host reports
//! the bounds of the element the image is drawn into with `set_surface` and
//! forwards pointer events in the same coordinate space.
//!
//! ```typescript
//! const editor = new JsEditor(decode_image(bytes));
//! editor.set_surface(0, 0, canvas.width, canvas.height);
//! editor.crop_button();                 // enter crop mode
//! editor.touch_start(x, y);
//! editor.touch_move(x2, y2);
//! editor.touch_end();
//! const error = editor.crop_button();   // confirm
//! if (error) alert(error);
//! ```

use serde::Serialize;
use snapcrop_core::crop::InteractionMode;
use snapcrop_core::editor::{CropButtonOutcome, EditorSession};
use snapcrop_core::geometry::{Point, Rect};
use snapcrop_core::vision::{FilterPreset, ImageOpsBackend};
use snapcrop_core::{EditorConfig, SourceImage};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsDecodedImage};

const NO_IMAGE_ON_SURFACE: &str = "No image on the display surface to crop.";

/// Everything the host needs to draw the crop overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct OverlayView {
    display_rect: Rect,
    crop_rect: Rect,
    resize_handle: Rect,
    mode: InteractionMode,
}

/// The editing screen for one photo.
#[wasm_bindgen]
pub struct JsEditor {
    session: EditorSession<ImageOpsBackend>,
    surface: Rect,
}

#[wasm_bindgen]
impl JsEditor {
    /// Start editing an upright image with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsDecodedImage) -> Result<JsEditor, JsValue> {
        Self::with_config(image, EditorConfig::default()).map_err(js_error)
    }

    /// Start editing with settings parsed from TOML text.
    pub fn with_config_toml(image: &JsDecodedImage, config: &str) -> Result<JsEditor, JsValue> {
        let config = EditorConfig::from_toml_str(config).map_err(js_error)?;
        Self::with_config(image, config).map_err(js_error)
    }

    /// Record the bounds of the element the image is drawn into.
    pub fn set_surface(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.surface = Rect::new(x, y, width, height);
    }

    /// Enter crop mode, or confirm the crop if already in it.
    ///
    /// Returns a message to show when crop mode could not start or the crop
    /// could not be applied.
    pub fn crop_button(&mut self) -> Option<String> {
        match self.session.crop_button(&self.surface) {
            CropButtonOutcome::Skipped => Some(NO_IMAGE_ON_SURFACE.to_string()),
            CropButtonOutcome::Failed(notice) => Some(notice.message),
            CropButtonOutcome::Entered | CropButtonOutcome::Cropped => None,
        }
    }

    pub fn cancel_crop(&mut self) {
        self.session.cancel_crop();
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.session.touch_start(Point::new(x, y));
    }

    pub fn touch_move(&mut self, x: f64, y: f64) {
        self.session.touch_move(Point::new(x, y));
    }

    pub fn touch_end(&mut self) {
        self.session.touch_end();
    }

    pub fn is_cropping(&self) -> bool {
        self.session.crop_state().is_active()
    }

    /// Current overlay as `{x, y, width, height}`, or `undefined` outside crop mode.
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.crop_state().crop_rect()).map_err(js_error)
    }

    /// Resize handle as `{x, y, width, height}`, or `undefined` outside crop mode.
    pub fn resize_handle(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.resize_handle()).map_err(js_error)
    }

    /// Display rectangle, overlay, handle and gesture mode in one object.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.overlay_view()).map_err(js_error)
    }

    /// Names of the preset filters, in strip order.
    pub fn filter_names(&self) -> Vec<String> {
        FilterPreset::ALL
            .iter()
            .map(|preset| preset.name().to_string())
            .collect()
    }

    /// Thumbnail of the preset at `index` for the filter strip.
    pub fn filter_thumbnail(&self, index: usize) -> Option<JsDecodedImage> {
        self.session
            .previews()
            .get(index)
            .map(|preview| JsDecodedImage::from_decoded(preview.thumbnail.clone()))
    }

    pub fn select_filter(&mut self, index: usize) -> bool {
        self.session.select_filter(index)
    }

    #[wasm_bindgen(getter)]
    pub fn selected_filter(&self) -> usize {
        FilterPreset::ALL
            .iter()
            .position(|&preset| preset == self.session.selected_filter())
            .unwrap_or(0)
    }

    /// Composite `watermark` into the bottom-right corner of the photo.
    pub fn add_watermark(&mut self, watermark: &JsDecodedImage) -> Result<(), JsValue> {
        self.session
            .add_watermark(&watermark.to_decoded())
            .map_err(js_error)
    }

    /// The photo as currently displayed.
    pub fn image(&self) -> JsDecodedImage {
        JsDecodedImage::from_decoded(self.session.image().clone())
    }

    /// Encode the displayed photo for download.
    pub fn export_jpeg(&self, quality: u8) -> Result<Vec<u8>, JsValue> {
        snapcrop_core::encode::encode_image(self.session.image(), quality).map_err(js_error)
    }
}

impl JsEditor {
    fn with_config(
        image: &JsDecodedImage,
        config: EditorConfig,
    ) -> Result<JsEditor, snapcrop_core::VisionError> {
        let session =
            EditorSession::with_image_ops(SourceImage::upright(image.to_decoded()), config)?;
        Ok(JsEditor {
            session,
            surface: Rect::ZERO,
        })
    }

    fn overlay_view(&self) -> Option<OverlayView> {
        self.session.crop_state().active().map(|active| OverlayView {
            display_rect: active.display_rect(),
            crop_rect: active.crop_rect(),
            resize_handle: active.resize_handle(&self.session.config().crop),
            mode: active.mode(),
        })
    }
}
