//! Profile-image upload gateway: validate, normalize, persist, return a
//! public URL. Storage backend is chosen once at startup from the config.

pub mod processing;
pub mod store;

pub use store::Uploader;

use thiserror::Error;

/// Any failure past validation (decode, convert, resize, encode, persist)
/// folds into this one error with a human-readable cause. Handlers map it
/// to a 400, never a 500.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to process image: {0}")]
    Image(String),

    #[error("Failed to store image: {0}")]
    Storage(String),
}
