//! Filesystem image store built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Encode JPEG | `image::codecs::jpeg::JpegEncoder` at the configured quality |
//! | Encode PNG, TIFF, WebP | `DynamicImage::write_to` (lossless) |
//!
//! Output is encoded into memory first, written to a temporary file next to
//! the target, and renamed over it. A failed encode or write leaves the
//! original file as it was.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::{self, Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Extensions this store can both decode and encode.
const FORMATS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Returns the set of file extensions the store can rewrite in place.
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    FORMATS.iter().map(|(ext, _)| *ext)
}

/// Write through `write` into a sibling temp file, then rename it to `path`.
///
/// The temp file is removed if `write` or the rename fails.
fn write_replacing(
    path: &Path,
    write: impl FnOnce(&mut NamedTempFile) -> io::Result<()>,
) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    write(&mut tmp)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn format_for(path: &Path) -> Option<ImageFormat> {
    let ext = path.extension()?.to_str()?;
    FORMATS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, fmt)| *fmt)
}

/// Filesystem store; see the [module docs](self) for the codec mapping.
pub struct RustBackend {
    quality: Quality,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::with_quality(Quality::default())
    }

    pub fn with_quality(quality: Quality) -> Self {
        Self { quality }
    }

    fn encode(&self, image: &DynamicImage, format: ImageFormat) -> image::ImageResult<Vec<u8>> {
        let mut buf = Vec::new();
        match format {
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                rgb.write_with_encoder(JpegEncoder::new_with_quality(
                    &mut buf,
                    self.quality.value(),
                ))?;
            }
            ImageFormat::WebP => {
                let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
                rgba.write_to(&mut Cursor::new(&mut buf), format)?;
            }
            _ => image.write_to(&mut Cursor::new(&mut buf), format)?,
        }
        Ok(buf)
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let dims = image::image_dimensions(path).map_err(|e| BackendError::unreadable(path, e))?;
        Ok(dims.into())
    }

    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        ImageReader::open(path)
            .map_err(|e| BackendError::unreadable(path, e))?
            .with_guessed_format()
            .map_err(|e| BackendError::unreadable(path, e))?
            .decode()
            .map_err(|e| BackendError::unreadable(path, e))
    }

    fn store(&self, path: &Path, image: &DynamicImage) -> Result<(), BackendError> {
        let format = format_for(path).ok_or_else(|| {
            let known: Vec<_> = supported_extensions().collect();
            BackendError::store_failed(
                path,
                format!("unsupported output format (expected {})", known.join(", ")),
            )
        })?;
        let bytes = self
            .encode(image, format)
            .map_err(|e| BackendError::store_failed(path, e))?;
        write_replacing(path, |file| file.write_all(&bytes))
            .map_err(|e| BackendError::store_failed(path, e))?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Stored image"
        );
        Ok(())
    }
}
