//! Image encoding for saving edited photos.

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError};
