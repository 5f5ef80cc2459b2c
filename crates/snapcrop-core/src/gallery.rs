//! Saving the edited photo to the device gallery.
//!
//! Saving is gated on photo-library permission. The permission prompt and
//! the write itself belong to the host platform and are reached through the
//! [`Gallery`] trait; [`save_to_gallery`] runs the flow and turns every
//! outcome into a [`Notice`] for the user.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::decode::DecodedImage;
use crate::encode::{encode_image, EncodeError};
use crate::notice::Notice;

/// Photo-library permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Authorized,
    /// The user has not been asked yet.
    NotDetermined,
    Denied,
}

/// Errors that can occur while writing to the gallery.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Photo library access was denied")]
    PermissionDenied,

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The device photo library.
pub trait Gallery {
    fn authorization_status(&self) -> PermissionStatus;

    /// Prompt the user for access and report their answer.
    fn request_authorization(&self) -> PermissionStatus;

    /// Store an encoded JPEG.
    fn save(&self, jpeg: &[u8]) -> Result<(), GalleryError>;
}

/// Result of a save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The photo was stored; after the notice is dismissed the host returns
    /// to the first screen.
    Saved(Notice),
    /// Nothing was stored.
    Failed(Notice),
}

impl SaveOutcome {
    pub fn notice(&self) -> &Notice {
        match self {
            SaveOutcome::Saved(notice) | SaveOutcome::Failed(notice) => notice,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

/// Encode `image` and store it, asking for permission first if needed.
pub fn save_to_gallery<G: Gallery + ?Sized>(
    image: &DecodedImage,
    gallery: &G,
    quality: u8,
) -> SaveOutcome {
    if image.is_empty() {
        return SaveOutcome::Failed(Notice::new("Error", "No image to save."));
    }

    match gallery.authorization_status() {
        PermissionStatus::Authorized => write_image(image, gallery, quality),
        PermissionStatus::NotDetermined => match gallery.request_authorization() {
            PermissionStatus::Authorized => write_image(image, gallery, quality),
            _ => {
                warn!("photo library access refused at prompt");
                SaveOutcome::Failed(Notice::new(
                    "Permission Denied",
                    "Please enable photo access in settings.",
                ))
            }
        },
        PermissionStatus::Denied => SaveOutcome::Failed(Notice::new(
            "Permission Denied",
            "Go to Settings → Privacy → Photos and allow access.",
        )),
    }
}

fn write_image<G: Gallery + ?Sized>(image: &DecodedImage, gallery: &G, quality: u8) -> SaveOutcome {
    let result = encode_image(image, quality)
        .map_err(GalleryError::from)
        .and_then(|jpeg| gallery.save(&jpeg));

    match result {
        Ok(()) => {
            info!(width = image.width, height = image.height, "image saved to gallery");
            SaveOutcome::Saved(Notice::new("Success", "Image saved to gallery!"))
        }
        Err(err) => {
            warn!(%err, "gallery save failed");
            SaveOutcome::Failed(Notice::new("Save Failed", err.to_string()))
        }
    }
}

/// A gallery backed by a directory of numbered `IMG_NNNN.jpg` files.
///
/// Always authorized.
#[derive(Debug, Clone)]
pub struct DirectoryGallery {
    dir: PathBuf,
}

impl DirectoryGallery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `jpeg` to the first unused file name and return its path.
    pub fn save_file(&self, jpeg: &[u8]) -> Result<PathBuf, GalleryError> {
        fs::create_dir_all(&self.dir)?;
        for index in 1u32.. {
            let path = self.dir.join(format!("IMG_{index:04}.jpg"));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(jpeg)?;
                    return Ok(path);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(std::io::Error::other("gallery directory is full").into())
    }
}

impl Gallery for DirectoryGallery {
    fn authorization_status(&self) -> PermissionStatus {
        PermissionStatus::Authorized
    }

    fn request_authorization(&self) -> PermissionStatus {
        PermissionStatus::Authorized
    }

    fn save(&self, jpeg: &[u8]) -> Result<(), GalleryError> {
        self.save_file(jpeg).map(|_| ())
    }
}
