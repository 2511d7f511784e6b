use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::contract::model::{FavoritesRef, UserId, UserResource};
use crate::domain::error::DomainError;
use crate::domain::links::LinkBuilder;
use crate::domain::projection::non_blank;
use crate::domain::repo::IdentitySource;
use crate::infra::error::SourceError;

pub const DIRECTORY_SOURCE: &str = "directory";

/// One directory entry: a distinguished name plus multi-valued attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryEntry {
    pub dn: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// First non-blank value of `name`, attribute names compared case-insensitively.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .flat_map(|(_, values)| values.iter())
            .map(String::as_str)
            .find(|v| !v.trim().is_empty())
    }

    /// Value of the leading `uid=` RDN, if the dn starts with one.
    fn rdn_uid(&self) -> Option<&str> {
        let rdn = self.dn.split(',').next()?.trim();
        let (attr, value) = rdn.split_once('=')?;
        attr.trim()
            .eq_ignore_ascii_case("uid")
            .then(|| value.trim())
    }
}

/// A user as described by a directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    id: UserId,
    full_name: String,
    email: Option<String>,
    favorites: FavoritesRef,
}

impl DirectoryUser {
    /// Resource name this type registers its capabilities under.
    pub const RESOURCE: &'static str = "DirectoryUser";

    /// `uid` is required; the display name comes from `displayName` or `cn` and falls back to the id.
    pub fn from_entry(
        requested: &str,
        entry: &DirectoryEntry,
        links: &LinkBuilder,
    ) -> Result<Self, DomainError> {
        let id = entry
            .first("uid")
            .and_then(|raw| UserId::new(raw).ok())
            .ok_or_else(|| DomainError::missing_identifier(requested, DIRECTORY_SOURCE))?;

        let full_name = non_blank(entry.first("displayName"))
            .or_else(|| non_blank(entry.first("cn")))
            .unwrap_or(id.as_str())
            .to_string();
        let email = entry.first("mail").map(str::to_string);
        let favorites = links.favorites_for(&id);

        Ok(Self {
            id,
            full_name,
            email,
            favorites,
        })
    }
}

impl UserResource for DirectoryUser {
    fn id(&self) -> &UserId {
        &self.id
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn favorites(&self) -> &FavoritesRef {
        &self.favorites
    }
}

/// Read-only directory, entries addressed by the `uid=` RDN of their dn.
#[derive(Debug, Default)]
pub struct DirectorySource {
    by_uid: BTreeMap<String, DirectoryEntry>,
}

impl DirectorySource {
    /// Entries whose dn does not start with a `uid=` RDN cannot be addressed and are skipped.
    /// So are entries whose `uid` attribute disagrees with the RDN; the first claim on a uid wins.
    pub fn new(entries: impl IntoIterator<Item = DirectoryEntry>) -> Self {
        let mut by_uid = BTreeMap::new();
        for entry in entries {
            let Some(uid) = entry.rdn_uid().filter(|uid| !uid.is_empty()) else {
                tracing::warn!(dn = %entry.dn, "Skipping directory entry without uid RDN");
                continue;
            };
            let uid = uid.to_string();
            if let Err(e) = Self::check_entry(&by_uid, &uid, &entry) {
                tracing::warn!(dn = %entry.dn, error = %e, "Skipping directory entry");
                continue;
            }
            by_uid.insert(uid, entry);
        }
        Self { by_uid }
    }

    /// The `uid` attribute, when present, must name the same user as the RDN.
    fn check_entry(
        by_uid: &BTreeMap<String, DirectoryEntry>,
        uid: &str,
        entry: &DirectoryEntry,
    ) -> Result<(), SourceError> {
        if let Some(id) = entry.first("uid") {
            if id != uid {
                return Err(SourceError::KeyMismatch {
                    source_name: DIRECTORY_SOURCE,
                    key: uid.to_string(),
                    id: id.to_string(),
                });
            }
        }
        if by_uid.contains_key(uid) {
            return Err(SourceError::DuplicateKey {
                source_name: DIRECTORY_SOURCE,
                key: uid.to_string(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_uid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uid.is_empty()
    }
}

#[async_trait]
impl IdentitySource for DirectorySource {
    fn name(&self) -> &'static str {
        DIRECTORY_SOURCE
    }

    async fn resolve(
        &self,
        id: &str,
        links: &LinkBuilder,
    ) -> Result<Option<Arc<dyn UserResource>>, DomainError> {
        let Some(entry) = self.by_uid.get(id) else {
            return Ok(None);
        };
        let user = DirectoryUser::from_entry(id, entry, links)?;
        Ok(Some(Arc::new(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> DirectoryEntry {
        DirectoryEntry::new("uid=bob,ou=people,dc=example,dc=com")
            .with_attr("uid", "bob")
            .with_attr("cn", "Bob Builder")
            .with_attr("mail", "bob@example.com")
    }

    #[test]
    fn projects_entry() {
        let user = DirectoryUser::from_entry("bob", &bob(), &LinkBuilder::default()).unwrap();
        assert_eq!(user.id().as_str(), "bob");
        assert_eq!(user.full_name(), "Bob Builder");
        assert_eq!(user.email(), Some("bob@example.com"));
        assert_eq!(user.favorites().href(), "/blue/rest/users/bob/favorites/");
    }

    #[test]
    fn display_name_wins_over_cn() {
        let entry = bob().with_attr("displayName", "Bob B.");
        let user = DirectoryUser::from_entry("bob", &entry, &LinkBuilder::default()).unwrap();
        assert_eq!(user.full_name(), "Bob B.");
    }

    #[test]
    fn attribute_names_ignore_case() {
        let entry = DirectoryEntry::new("UID=amy,dc=example")
            .with_attr("UID", "amy")
            .with_attr("Mail", "amy@example.com");
        assert_eq!(entry.first("uid"), Some("amy"));
        assert_eq!(entry.first("mail"), Some("amy@example.com"));
        assert_eq!(entry.rdn_uid(), Some("amy"));
    }

    #[test]
    fn entry_without_uid_attribute_fails_fast() {
        let entry = DirectoryEntry::new("uid=carl,dc=example").with_attr("cn", "Carl");
        let err = DirectoryUser::from_entry("carl", &entry, &LinkBuilder::default()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MissingIdentifier { source_name: DIRECTORY_SOURCE, .. }
        ));
    }

    #[tokio::test]
    async fn source_addresses_entries_by_rdn() {
        let source = DirectorySource::new([
            bob(),
            DirectoryEntry::new("cn=admins,ou=groups,dc=example").with_attr("cn", "admins"),
        ]);
        assert_eq!(source.len(), 1);

        let links = LinkBuilder::default();
        assert!(source.resolve("bob", &links).await.unwrap().is_some());
        assert!(source.resolve("admins", &links).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rdn_and_uid_attribute_must_agree() {
        let source = DirectorySource::new([DirectoryEntry::new("uid=bob,ou=people,dc=example")
            .with_attr("uid", "robert")
            .with_attr("cn", "Robert")]);
        assert!(source.is_empty());

        let links = LinkBuilder::default();
        assert!(source.resolve("bob", &links).await.unwrap().is_none());
        assert!(source.resolve("robert", &links).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_entry_for_a_uid_is_kept() {
        let impostor = DirectoryEntry::new("uid=bob,ou=contractors,dc=example")
            .with_attr("uid", "bob")
            .with_attr("mail", "m@evil");
        let source = DirectorySource::new([bob(), impostor]);
        assert_eq!(source.len(), 1);

        let user = source
            .resolve("bob", &LinkBuilder::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.email(), Some("bob@example.com"));
    }

    #[test]
    fn entry_without_uid_attribute_is_still_loaded() {
        let carl = DirectoryEntry::new("uid=carl,dc=example").with_attr("cn", "Carl");
        let source = DirectorySource::new([carl]);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn resource_name_matches_type_name() {
        assert!(std::any::type_name::<DirectoryUser>().ends_with(DirectoryUser::RESOURCE));
    }
}
