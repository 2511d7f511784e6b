use std::fmt;

use resource_kit::export::Link;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability tag every user resource is registered under ("is a user").
pub const BLUE_USER: &str = "io.jenkins.blueocean.rest.model.BlueUser";

/// Wire names of the exported user fields.
pub const ID: &str = "id";
pub const FULL_NAME: &str = "fullName";
pub const EMAIL: &str = "email";
pub const FAVORITES: &str = "favorites";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("user id must not be empty")]
pub struct EmptyUserId;

/// Stable, non-empty user identifier. Never reused once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyUserId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EmptyUserId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = EmptyUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a user's favorites collection.
///
/// The collection itself belongs to the favorites subsystem; this only says
/// whose it is and where to find it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FavoritesRef {
    owner: UserId,
    href: String,
}

impl FavoritesRef {
    pub fn new(owner: UserId, href: impl Into<String>) -> Self {
        Self {
            owner,
            href: href.into(),
        }
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn link(&self) -> Link {
        Link::new(self.href.clone())
    }
}

/// Read-only view of one user: identity fields plus a handle to their favorites.
///
/// Implemented once per identity source (local accounts, an external directory, ...).
/// Every implementation keeps the same guarantees: `id` is non-empty and stable,
/// `favorites` always points at this user's collection. `email` carries no access
/// check here; it is exported as a restricted field and hidden by the visibility
/// policy of the request.
pub trait UserResource: Send + Sync {
    fn id(&self) -> &UserId;

    /// Display name, e.g. "Jane Doe".
    fn full_name(&self) -> &str;

    fn email(&self) -> Option<&str>;

    fn favorites(&self) -> &FavoritesRef;
}
