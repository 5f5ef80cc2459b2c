//! Snapcrop Core - photo editing library
//!
//! This crate provides the core of a one-screen photo editor: the letterboxed
//! coordinate mapping and touch-driven crop overlay, preset filter previews,
//! watermarking and saving to a gallery. Pixel operations are delegated to
//! collaborator traits in [`vision`].

pub mod config;
pub mod crop;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod gallery;
pub mod geometry;
pub mod mapping;
pub mod notice;
pub mod vision;

pub use config::{ConfigError, CropConfig, EditorConfig};
pub use crop::{ActiveCrop, CropEvent, CropState, InteractionMode};
pub use decode::{DecodeError, DecodedImage, Orientation, SourceImage};
pub use editor::{CropButtonOutcome, DisplaySurface, EditorSession};
pub use gallery::{save_to_gallery, DirectoryGallery, Gallery, PermissionStatus, SaveOutcome};
pub use geometry::{PixelRect, PixelSize, Point, Rect};
pub use mapping::{map_display_to_image, map_image_to_display, CropError};
pub use notice::Notice;
pub use vision::{
    FilterPreset, ImageFilters, ImageOpsBackend, PixelCropper, VisionError, Watermarker,
};

/// Crate version, reported by hosts in their about screen.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
