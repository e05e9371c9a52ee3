//! Process-wide configuration.
//!
//! Handles loading, validating, and merging `lattice.toml`. Stock defaults
//! are the base layer; a user file only needs the keys it wants to change.
//!
//! ## Keys
//!
//! ```toml
//! # every key is optional; these are the defaults
//!
//! [images]
//! uploaded_img_size = [800, 800]  # crop box applied to new uploads
//! crop_anchor = "middle"          # top | middle | bottom
//! quality = 90                    # JPEG quality when writing back (1-100)
//!
//! [slugs]
//! suffix_range = [1111, 9999]     # random suffix range on collision
//! max_attempts = 64               # suffixed candidates before giving up
//!
//! [descriptions]
//! max_chars = 160                 # generated description length
//!
//! [site]
//! current_site = 1                # site id assigned to new records
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{BackendError, CropAnchor, CropSpec, Quality};
use crate::records::{DescriptionPolicy, SiteId};
use crate::slugs::SlugPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "lattice.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `lattice.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatticeConfig {
    /// Upload crop settings.
    pub images: ImagesConfig,
    /// Slug collision handling.
    pub slugs: SlugPolicy,
    /// Generated description settings.
    pub descriptions: DescriptionPolicy,
    /// Current-site binding.
    pub site: SiteConfig,
}

impl LatticeConfig {
    /// Reject values the crop, slug and description steps cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [w, h] = self.images.uploaded_img_size;
        if w == 0 || h == 0 {
            return Err(ConfigError::Validation(
                "images.uploaded_img_size values must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.images.quality) {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        let [low, high] = self.slugs.suffix_range;
        if low > high {
            return Err(ConfigError::Validation(
                "slugs.suffix_range must be [low, high] with low <= high".into(),
            ));
        }
        if self.slugs.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "slugs.max_attempts must be at least 1".into(),
            ));
        }
        if self.descriptions.max_chars == 0 {
            return Err(ConfigError::Validation(
                "descriptions.max_chars must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Crop applied to freshly uploaded thumbnails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Target box as `[width, height]`.
    pub uploaded_img_size: [u32; 2],
    /// Region kept when the upload's aspect differs from the box.
    pub crop_anchor: CropAnchor,
    /// Lossy encoding quality used when the cropped file is written back.
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            uploaded_img_size: [800, 800],
            crop_anchor: CropAnchor::Middle,
            quality: 90,
        }
    }
}

impl ImagesConfig {
    pub fn crop_spec(&self) -> Result<CropSpec, BackendError> {
        let [w, h] = self.uploaded_img_size;
        CropSpec::new(w, h, self.crop_anchor)
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.quality)
    }
}

/// Site the process is serving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub current_site: SiteId,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            current_site: SiteId(1),
        }
    }
}

// -----------------------------------------------------------------------------
// Loading
// -----------------------------------------------------------------------------

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LatticeConfig::default()).expect("default config must serialize")
}

/// Layer `overlay` over `base`. Nested tables merge per key; any other
/// overlay value wins outright, and base keys the overlay omits survive.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<LatticeConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LatticeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`.
///
/// A missing file yields the validated stock defaults; a file that exists
/// but does not parse is an error.
pub fn load_config(path: &Path) -> Result<LatticeConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(overlay))
}

/// Returns a fully-commented stock `lattice.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Lattice Configuration
# =====================
# Every key is optional. Delete the ones you don't want to change.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Uploaded images
# ---------------------------------------------------------------------------
[images]
# Every new upload on a thumbnail-bearing record is cropped to this box,
# as [width, height] in pixels. The file is rewritten in place.
uploaded_img_size = [800, 800]

# Which part survives when the upload's aspect ratio differs from the box:
# "top", "middle" or "bottom" (left/center/right for landscape overshoot).
crop_anchor = "middle"

# JPEG quality used when writing the cropped file back (1-100).
quality = 90

# ---------------------------------------------------------------------------
# Slugs
# ---------------------------------------------------------------------------
[slugs]
# When a title's slug is taken, a random number from this inclusive range
# is appended to the title and the result slugified again.
suffix_range = [1111, 9999]

# Suffixed candidates to try before giving up with an error.
max_attempts = 64

# ---------------------------------------------------------------------------
# Descriptions
# ---------------------------------------------------------------------------
[descriptions]
# Records without a description get one from the first paragraph of their
# content, cut on a word boundary to at most this many characters.
max_chars = 160

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Site id bound to newly created site-scoped records.
current_site = 1
"##
}
