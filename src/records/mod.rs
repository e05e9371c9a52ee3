//! Record components and their lifecycle.
//!
//! Each concern a content record can carry is a small standalone struct:
//!
//! | Component | Concern |
//! |---|---|
//! | [`SiteScope`] | which site the record belongs to |
//! | [`Slugged`] | title plus unique URL slug |
//! | [`Authored`] | author and edit permission |
//! | [`Described`] | markdown content plus plain-text description |
//! | [`Thumbnail`] | uploaded image cropped on creation |
//!
//! A concrete record type embeds the components it needs and implements
//! [`Record`] to expose them. [`Lifecycle::save`] then drives the steps in a
//! fixed order; see [`lifecycle`] for the pipeline.

pub mod author;
pub mod description;
pub mod lifecycle;
pub mod site;
pub mod slugged;
pub mod store;
pub mod thumbnail;

pub use author::{Actor, Authored, UserId};
pub use description::{Described, DescriptionPolicy, generate_description};
pub use lifecycle::{Lifecycle, LifecycleError, SaveOptions, SaveOutcome};
pub use site::{SiteId, SiteScope};
pub use slugged::Slugged;
pub use store::{MemoryStore, RecordId, RecordRow, RecordStore, StoreError};
pub use thumbnail::{Hooks, Thumbnail};

use std::path::Path;

/// A persisted content record.
///
/// Component accessors default to `None`; a type overrides the ones for the
/// components it embeds.
pub trait Record {
    /// Namespace for slug uniqueness and hook registration.
    const KIND: &'static str;

    fn id(&self) -> Option<RecordId>;

    fn set_id(&mut self, id: RecordId);

    fn site_scope_mut(&mut self) -> Option<&mut SiteScope> {
        None
    }

    fn slugged_mut(&mut self) -> Option<&mut Slugged> {
        None
    }

    fn described_mut(&mut self) -> Option<&mut Described> {
        None
    }

    /// Stored path of the record's uploaded image, if any.
    fn thumbnail(&self) -> Option<&Path> {
        None
    }
}
