//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they plan a
//! crop from the source dimensions, do the pixel work with Lanczos3, and hand
//! the result back to the store.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::plan_crop;
use super::params::CropSpec;
use image::DynamicImage;
use image::imageops::FilterType;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Resize `image` to cover `target`, then cut the target box out of it.
///
/// The output always has exactly `target.width × target.height` pixels.
pub fn crop_to_fit(image: &DynamicImage, target: &CropSpec) -> Result<DynamicImage> {
    let source = (image.width(), image.height());
    if source.0 == 0 || source.1 == 0 {
        return Err(BackendError::InvalidArgument(
            "cannot crop an empty image".into(),
        ));
    }

    let plan = plan_crop(source, target.dimensions(), target.anchor);
    tracing::debug!(
        source = ?source,
        resize = ?plan.resize,
        offset = ?plan.offset,
        anchor = %target.anchor,
        "Planned crop"
    );

    let resized = image.resize_exact(plan.resize.0, plan.resize.1, FilterType::Lanczos3);
    Ok(match plan.offset {
        Some(offset) => resized.crop_imm(offset.x, offset.y, target.width, target.height),
        None => resized,
    })
}

/// Load the image at `path`, crop it to `target` and overwrite it in place.
///
/// Destructive: the uncropped original is not kept.
pub fn crop_file_to_fit(
    backend: &impl ImageBackend,
    path: &Path,
    target: &CropSpec,
) -> Result<Dimensions> {
    let image = backend.load(path)?;
    let cropped = crop_to_fit(&image, target)?;
    backend.store(path, &cropped)?;

    tracing::info!(
        path = %path.display(),
        from = ?(image.width(), image.height()),
        to = ?target.dimensions(),
        "Cropped image in place"
    );
    Ok(Dimensions {
        width: cropped.width(),
        height: cropped.height(),
    })
}

/// Like [`crop_file_to_fit`], with the anchor given by name.
///
/// The anchor is validated before the file is read, so a bad name never
/// touches the stored image.
pub fn crop_file_with_anchor(
    backend: &impl ImageBackend,
    path: &Path,
    width: u32,
    height: u32,
    anchor: &str,
) -> Result<Dimensions> {
    let target = CropSpec::parse(width, height, anchor)?;
    crop_file_to_fit(backend, path, &target)
}
