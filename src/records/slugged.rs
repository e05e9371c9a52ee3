//! Title and slug component.

use super::lifecycle::LifecycleError;
use crate::slugs::{SlugPolicy, generate_unique_slug};

/// A title plus the URL slug derived from it.
///
/// Once set, the slug is left alone on later saves. Call
/// [`Slugged::regenerate`] to have the next save derive a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slugged {
    pub title: String,
    pub slug: Option<String>,
}

impl Slugged {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: None,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }

    pub fn regenerate(&mut self) {
        self.slug = None;
    }
}

/// Derive a slug for `slugged` if it has none. Returns whether one was written.
pub fn assign_slug(
    slugged: &mut Slugged,
    exists: impl FnMut(&str) -> bool,
    policy: &SlugPolicy,
) -> Result<bool, LifecycleError> {
    if slugged.slug().is_some() {
        return Ok(false);
    }

    let slug = generate_unique_slug(&slugged.title, exists, policy)?;
    if slug.is_empty() {
        return Err(LifecycleError::EmptySlug {
            title: slugged.title.clone(),
        });
    }
    slugged.slug = Some(slug);
    Ok(true)
}
