//! Unique slug generation.
//!
//! A slug is the URL-safe form of a record title: lower-case ASCII letters and
//! digits joined by single dashes (`[a-z0-9]+(-[a-z0-9]+)*`). Non-ASCII text
//! is transliterated by the [`slug`] crate before stripping.
//!
//! ## Collisions
//!
//! When the plain slug is already taken, a random four-digit suffix is
//! appended to the *original title* and the result slugified again:
//!
//! ```text
//! "Hello, World!"         → hello-world
//! "Hello, World!" (taken) → hello-world-4821
//! ```
//!
//! Each retry draws a fresh suffix from [`SlugPolicy::suffix_range`]. The
//! loop is capped at [`SlugPolicy::max_attempts`]; with roughly 8900 possible
//! suffixes a collision streak that long means the namespace is saturated,
//! and the call fails with [`SlugError::ExhaustedRetries`] instead of spinning.
//!
//! ## Races
//!
//! The `exists` check and the eventual insert are not atomic. The persistence
//! layer's uniqueness constraint on `(kind, slug)` has the final word.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SlugError {
    #[error("no free slug for `{title}` after {attempts} attempts")]
    ExhaustedRetries { title: String, attempts: u32 },
}

/// Knobs for collision handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlugPolicy {
    /// Inclusive `[low, high]` range random suffixes are drawn from.
    pub suffix_range: [u32; 2],
    /// Suffixed candidates tried before giving up.
    pub max_attempts: u32,
}

impl Default for SlugPolicy {
    fn default() -> Self {
        Self {
            suffix_range: [1111, 9999],
            max_attempts: 64,
        }
    }
}

impl SlugPolicy {
    /// Suffix range with its bounds in order, so it is never empty.
    pub fn suffixes(&self) -> RangeInclusive<u32> {
        let [a, b] = self.suffix_range;
        a.min(b)..=a.max(b)
    }
}

/// Slugify `input`: transliterate, lower-case, collapse separators.
///
/// Returns an empty string when `input` has no alphanumeric content.
pub fn slugify(input: &str) -> String {
    slug::slugify(input)
}

/// Produce a slug for `title` that `exists` reports as free.
///
/// Uses the thread-local RNG for suffixes; see [`generate_unique_slug_with`]
/// to supply a seeded one.
pub fn generate_unique_slug(
    title: &str,
    exists: impl FnMut(&str) -> bool,
    policy: &SlugPolicy,
) -> Result<String, SlugError> {
    generate_unique_slug_with(title, exists, policy, &mut rand::rng())
}

/// [`generate_unique_slug`] with an explicit random source.
pub fn generate_unique_slug_with<R: Rng>(
    title: &str,
    mut exists: impl FnMut(&str) -> bool,
    policy: &SlugPolicy,
    rng: &mut R,
) -> Result<String, SlugError> {
    let base = slugify(title);
    if !exists(&base) {
        return Ok(base);
    }

    for attempt in 1..=policy.max_attempts {
        let suffix = rng.random_range(policy.suffixes());
        let candidate = slugify(&format!("{title}-{suffix}"));
        if !exists(&candidate) {
            tracing::debug!(%base, %candidate, attempt, "Resolved slug collision");
            return Ok(candidate);
        }
    }

    tracing::warn!(
        %base,
        attempts = policy.max_attempts,
        "Slug suffixes exhausted"
    );
    Err(SlugError::ExhaustedRetries {
        title: title.to_string(),
        attempts: policy.max_attempts,
    })
}
