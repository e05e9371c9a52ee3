//! The save pipeline.
//!
//! [`Lifecycle::save`] runs each component step in a fixed order:
//!
//! ```text
//! site-assign → slug-generate → description-generate → persist → thumbnail-crop
//! ```
//!
//! Steps a record has no component for are skipped. The crop only runs when
//! the save created the record, the record's kind is registered in
//! [`Hooks`], and the record carries an image path. It runs after the record
//! is persisted; a crop failure is reported with the new id so the caller
//! can decide between rolling back and keeping an uncropped upload.

use super::description::assign_description;
use super::site::assign_site;
use super::slugged::assign_slug;
use super::store::{RecordId, RecordRow, RecordStore, StoreError};
use super::thumbnail::Hooks;
use super::Record;
use crate::config::LatticeConfig;
use crate::imaging::{BackendError, Dimensions, ImageBackend, crop_file_to_fit};
use crate::slugs::SlugError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("title `{title}` produces an empty slug")]
    EmptySlug { title: String },
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("record {id} was saved but cropping its thumbnail failed: {source}")]
    Crop {
        id: RecordId,
        #[source]
        source: BackendError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Rebind a site-scoped record to the current site even on update.
    pub update_site: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: RecordId,
    pub created: bool,
    /// Final thumbnail size when the crop hook ran.
    pub cropped: Option<Dimensions>,
}

/// Record lifecycle bound to a store, an image backend and configuration.
pub struct Lifecycle<S, B> {
    store: S,
    images: B,
    hooks: Hooks,
    config: LatticeConfig,
}

impl<S: RecordStore, B: ImageBackend> Lifecycle<S, B> {
    pub fn new(store: S, images: B, hooks: Hooks, config: LatticeConfig) -> Self {
        tracing::debug!(kinds = ?hooks.thumbnail_kinds(), "Thumbnail crop registered");
        Self {
            store,
            images,
            hooks,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn images(&self) -> &B {
        &self.images
    }

    /// Save `record`, running every component step in order.
    pub fn save<R: Record>(
        &mut self,
        record: &mut R,
        options: SaveOptions,
    ) -> Result<SaveOutcome, LifecycleError> {
        let created = record.id().is_none();

        if let Some(scope) = record.site_scope_mut() {
            assign_site(
                scope,
                self.config.site.current_site,
                created || options.update_site,
            );
        }

        let slug = match record.slugged_mut() {
            Some(slugged) => {
                let store = &self.store;
                assign_slug(
                    slugged,
                    |candidate| store.exists(R::KIND, candidate),
                    &self.config.slugs,
                )?;
                slugged.slug.clone()
            }
            None => None,
        };

        if let Some(described) = record.described_mut() {
            assign_description(described, &self.config.descriptions);
        }

        let id = self.store.save(RecordRow {
            kind: R::KIND,
            id: record.id(),
            slug: slug.as_deref(),
        })?;
        record.set_id(id);
        tracing::info!(kind = R::KIND, %id, created, slug = ?slug, "Saved record");

        let cropped = if created && self.hooks.crops::<R>() {
            match record.thumbnail() {
                Some(path) => {
                    let dims = self
                        .config
                        .images
                        .crop_spec()
                        .and_then(|spec| crop_file_to_fit(&self.images, path, &spec))
                        .map_err(|source| LifecycleError::Crop { id, source })?;
                    Some(dims)
                }
                None => None,
            }
        } else {
            None
        };

        Ok(SaveOutcome {
            id,
            created,
            cropped,
        })
    }
}
