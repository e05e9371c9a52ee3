//! Authorship.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authored {
    pub author: UserId,
}

impl Authored {
    /// In-place editing is limited to the author and superusers.
    pub fn is_editable(&self, actor: &Actor) -> bool {
        actor.is_superuser || actor.id == self.author
    }
}
