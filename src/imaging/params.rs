//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! the high-level [`operations`](super::operations) (which decide what a crop
//! looks like) and the [`backend`](super::backend) (which loads and stores
//! pixels), so the store can be swapped for a mock in tests.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`CropAnchor`]: Which part of an oversized resize survives the crop.
//! - [`CropSpec`]: Target box plus anchor; the full description of a crop-to-fit.

use super::backend::BackendError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Region kept when the resized image overshoots the target box.
///
/// The names describe the vertical case. When the overshoot is horizontal
/// the same variants map to left, center and right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropAnchor {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl CropAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            CropAnchor::Top => "top",
            CropAnchor::Middle => "middle",
            CropAnchor::Bottom => "bottom",
        }
    }
}

impl fmt::Display for CropAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropAnchor {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(CropAnchor::Top),
            "middle" => Ok(CropAnchor::Middle),
            "bottom" => Ok(CropAnchor::Bottom),
            other => Err(BackendError::InvalidArgument(format!(
                "unknown crop anchor `{other}` (expected top, middle or bottom)"
            ))),
        }
    }
}

/// Target box for a crop-to-fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSpec {
    pub width: u32,
    pub height: u32,
    pub anchor: CropAnchor,
}

impl CropSpec {
    /// Build a spec, rejecting zero-sized boxes.
    pub fn new(width: u32, height: u32, anchor: CropAnchor) -> Result<Self, BackendError> {
        if width == 0 || height == 0 {
            return Err(BackendError::InvalidArgument(format!(
                "crop target must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            anchor,
        })
    }

    /// Build a spec from an untyped anchor name, as read from a CLI flag or form.
    pub fn parse(width: u32, height: u32, anchor: &str) -> Result<Self, BackendError> {
        let anchor = anchor.parse()?;
        Self::new(width, height, anchor)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn anchor_parses_known_names() {
        assert_eq!("top".parse::<CropAnchor>().unwrap(), CropAnchor::Top);
        assert_eq!("middle".parse::<CropAnchor>().unwrap(), CropAnchor::Middle);
        assert_eq!("bottom".parse::<CropAnchor>().unwrap(), CropAnchor::Bottom);
    }

    #[test]
    fn anchor_rejects_horizontal_names() {
        let err = "left".parse::<CropAnchor>().unwrap_err();
        assert!(matches!(err, BackendError::InvalidArgument(msg) if msg.contains("left")));
    }

    #[test]
    fn anchor_is_case_sensitive() {
        assert!("Top".parse::<CropAnchor>().is_err());
    }

    #[test]
    fn spec_rejects_zero_dimensions() {
        assert!(matches!(
            CropSpec::new(0, 800, CropAnchor::Top),
            Err(BackendError::InvalidArgument(_))
        ));
        assert!(matches!(
            CropSpec::new(800, 0, CropAnchor::Top),
            Err(BackendError::InvalidArgument(_))
        ));
    }

    #[test]
    fn spec_parse_combines_anchor_and_size() {
        let spec = CropSpec::parse(640, 480, "bottom").unwrap();
        assert_eq!(spec.dimensions(), (640, 480));
        assert_eq!(spec.anchor, CropAnchor::Bottom);
    }
}
