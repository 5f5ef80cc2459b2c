//! Decoding picked or captured photos into a [`SourceImage`].

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation, SourceImage};

/// Decode JPEG or PNG bytes, keeping the EXIF orientation alongside the pixels.
///
/// The orientation is not applied here; call [`SourceImage::into_upright`]
/// before any geometry is computed against the image.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for empty input or an unknown format,
/// `DecodeError::CorruptedFile` when the data cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(SourceImage::new(
        DecodedImage::from_rgb_image(img.into_rgb8()),
        read_orientation(bytes),
    ))
}

/// Read the EXIF orientation tag.
///
/// Returns `Orientation::Normal` if there is no EXIF data or no orientation.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}
