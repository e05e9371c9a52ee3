//! Thumbnail-bearing records and the crop-on-create registration list.
//!
//! A record type opts in twice: it exposes its image path through
//! [`Record::thumbnail`], and the application lists the type in its
//! [`Hooks`] at startup:
//!
//! ```
//! # use lattice::records::{Hooks, Record, RecordId, Thumbnail};
//! # use std::path::Path;
//! struct Photo { id: Option<RecordId>, image: Thumbnail }
//! impl Record for Photo {
//!     const KIND: &'static str = "photo";
//!     fn id(&self) -> Option<RecordId> { self.id }
//!     fn set_id(&mut self, id: RecordId) { self.id = Some(id) }
//!     fn thumbnail(&self) -> Option<&Path> { self.image.path() }
//! }
//!
//! let hooks = Hooks::new().crop_thumbnails::<Photo>();
//! assert!(hooks.crops::<Photo>());
//! ```

use super::Record;
use std::path::{Path, PathBuf};

/// Stored location of an uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thumbnail {
    pub image: Option<PathBuf>,
}

impl Thumbnail {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            image: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.image.as_deref()
    }
}

/// Record kinds whose uploads are cropped right after creation.
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    thumbnail_kinds: Vec<&'static str>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `R` as thumbnail-bearing.
    pub fn crop_thumbnails<R: Record>(mut self) -> Self {
        if !self.thumbnail_kinds.contains(&R::KIND) {
            self.thumbnail_kinds.push(R::KIND);
        }
        self
    }

    pub fn crops<R: Record>(&self) -> bool {
        self.thumbnail_kinds.contains(&R::KIND)
    }

    pub fn thumbnail_kinds(&self) -> &[&'static str] {
        &self.thumbnail_kinds
    }
}
