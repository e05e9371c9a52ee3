//! Persistence collaborator.
//!
//! The lifecycle only needs two things from storage: an exact-match slug
//! lookup and a save that enforces `(kind, slug)` uniqueness. The check in
//! the slug generator and the insert here are not atomic, so `save` is the
//! final authority and reports [`StoreError::DuplicateSlug`] on a race.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} slug `{slug}` is already taken")]
    DuplicateSlug { kind: &'static str, slug: String },
    #[error("{kind} {id} does not exist")]
    NotFound { kind: &'static str, id: RecordId },
}

/// What the store sees of a record on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRow<'a> {
    pub kind: &'static str,
    /// `None` inserts a new record.
    pub id: Option<RecordId>,
    pub slug: Option<&'a str>,
}

pub trait RecordStore {
    /// Exact-match lookup of `slug` within `kind`.
    fn exists(&self, kind: &str, slug: &str) -> bool;

    /// Insert or update, enforcing slug uniqueness within `kind`.
    fn save(&mut self, row: RecordRow<'_>) -> Result<RecordId, StoreError>;
}

/// In-process store keyed by kind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    last_id: u64,
    slugs: HashMap<&'static str, HashMap<String, RecordId>>,
    rows: HashMap<RecordId, (&'static str, Option<String>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn slug_of(&self, id: RecordId) -> Option<&str> {
        self.rows.get(&id).and_then(|(_, slug)| slug.as_deref())
    }

    fn owner(&self, kind: &str, slug: &str) -> Option<RecordId> {
        self.slugs.get(kind).and_then(|by_slug| by_slug.get(slug)).copied()
    }
}

impl RecordStore for MemoryStore {
    fn exists(&self, kind: &str, slug: &str) -> bool {
        self.owner(kind, slug).is_some()
    }

    fn save(&mut self, row: RecordRow<'_>) -> Result<RecordId, StoreError> {
        if let Some(id) = row.id {
            match self.rows.get(&id) {
                Some((kind, _)) if *kind == row.kind => {}
                _ => return Err(StoreError::NotFound { kind: row.kind, id }),
            }
        }

        if let Some(slug) = row.slug {
            let owner = self.owner(row.kind, slug);
            if owner.is_some() && owner != row.id {
                return Err(StoreError::DuplicateSlug {
                    kind: row.kind,
                    slug: slug.to_string(),
                });
            }
        }

        let id = match row.id {
            Some(id) => id,
            None => {
                self.last_id += 1;
                RecordId(self.last_id)
            }
        };

        let by_slug = self.slugs.entry(row.kind).or_default();
        if let Some((_, Some(old))) = self.rows.get(&id) {
            by_slug.remove(old);
        }
        if let Some(slug) = row.slug {
            by_slug.insert(slug.to_string(), id);
        }
        self.rows
            .insert(id, (row.kind, row.slug.map(str::to_string)));
        Ok(id)
    }
}
