//! Site scoping.
//!
//! A site-scoped record belongs to exactly one site. The binding is made on
//! first save from the process's current site and only changes afterwards
//! when a save explicitly asks for it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a site served by this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u32);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteScope {
    pub site: Option<SiteId>,
}

impl SiteScope {
    /// Whether the record should be shown on `current`.
    pub fn is_displayable_for_site(&self, current: SiteId) -> bool {
        self.site == Some(current)
    }
}

/// Bind `scope` to `current` when `rebind` is set.
///
/// The lifecycle passes `rebind = is_new || update_site`. Returns whether the
/// binding changed.
pub fn assign_site(scope: &mut SiteScope, current: SiteId, rebind: bool) -> bool {
    if !rebind || scope.site == Some(current) {
        return false;
    }
    scope.site = Some(current);
    true
}
