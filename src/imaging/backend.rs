//! Image store trait and shared types.
//!
//! The [`ImageBackend`] trait is the file-store collaborator: it knows how to
//! read a bitmap from a path and write one back. Crop geometry lives in
//! [`operations`](super::operations) and never touches the filesystem itself.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure-Rust codecs.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Cannot read image {path}: {reason}")]
    SourceUnreadable { path: PathBuf, reason: String },
    #[error("Cannot write image {path}: {reason}")]
    StoreFailed { path: PathBuf, reason: String },
}

impl BackendError {
    pub(crate) fn unreadable(path: &Path, reason: impl ToString) -> Self {
        BackendError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn store_failed(path: &Path, reason: impl ToString) -> Self {
        BackendError::StoreFailed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Trait for image stores.
///
/// `store` replaces whatever lives at `path`. Implementations should not
/// leave a half-written file behind when encoding fails.
pub trait ImageBackend {
    /// Get image dimensions without keeping the decoded pixels.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the bitmap stored at `path`.
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` and write it to `path`, overwriting any existing file.
    fn store(&self, path: &Path, image: &DynamicImage) -> Result<(), BackendError>;
}
