//! # Lattice
//!
//! Building blocks for content-managed sites. Records get a unique URL slug
//! from their title, uploaded thumbnails are cropped to a fixed box on
//! creation, and forms render with Foundation grid markup.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`slugs`] | Slugify a title and resolve collisions with a random numeric suffix |
//! | [`imaging`] | Aspect-preserving crop-to-fit: fill geometry, anchors, in-place write-back |
//! | [`records`] | Record components (site, slug, author, description, thumbnail) and the save pipeline |
//! | [`widgets`] | Foundation-styled rendering of fields, forms and formsets using Maud |
//! | [`config`] | `lattice.toml` loading, merging over stock defaults, validation |
//!
//! # Design Decisions
//!
//! ## Leaf Utilities, Explicit Pipeline
//!
//! [`slugs`] and [`imaging`] know nothing about records or each other. The
//! record pipeline in [`records::lifecycle`] calls them in a fixed order, so
//! the order in which components run is visible in one function rather than
//! spread across save hooks.
//!
//! ```text
//! site-assign → slug-generate → description-generate → persist → thumbnail-crop
//! ```
//!
//! ## Collaborators Behind Traits
//!
//! Persistence ([`records::RecordStore`]) and image I/O
//! ([`imaging::ImageBackend`]) are traits. Tests run the whole pipeline
//! against an in-memory store and a mock image backend; the binary uses
//! [`imaging::RustBackend`], built on the pure-Rust `image` crate.
//!
//! ## Bounded Slug Retries
//!
//! Collision resolution draws at most `slugs.max_attempts` suffixes before
//! giving up with [`slugs::SlugError::ExhaustedRetries`]. The store still
//! enforces uniqueness on save, since the check and the insert are separate.

pub mod config;
pub mod imaging;
pub mod records;
pub mod slugs;
pub mod widgets;
