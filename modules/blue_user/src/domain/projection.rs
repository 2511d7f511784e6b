use serde::{Deserialize, Serialize};

use crate::contract::model::{FavoritesRef, UserId, UserResource};
use crate::domain::error::DomainError;
use crate::domain::links::LinkBuilder;

/// Source name reported when a local account record lacks an id.
pub const LOCAL_SOURCE: &str = "local";

/// Identity data as kept by the local account store. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IdentityRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "full_name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl IdentityRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Per-request projection of a local account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProjection {
    id: UserId,
    full_name: String,
    email: Option<String>,
    favorites: FavoritesRef,
}

impl UserProjection {
    /// Resource name this type registers its capabilities under.
    pub const RESOURCE: &'static str = "UserProjection";

    /// Project `record`, failing fast when it has no usable id.
    ///
    /// A missing or blank display name falls back to the id; a blank email counts as none.
    /// `requested` is the key the record was looked up by, used for error reporting.
    pub fn from_record(
        requested: &str,
        record: &IdentityRecord,
        links: &LinkBuilder,
    ) -> Result<Self, DomainError> {
        let id = record
            .id
            .as_deref()
            .and_then(|raw| UserId::new(raw).ok())
            .ok_or_else(|| DomainError::missing_identifier(requested, LOCAL_SOURCE))?;

        let full_name = non_blank(record.full_name.as_deref())
            .unwrap_or(id.as_str())
            .to_string();
        let email = non_blank(record.email.as_deref()).map(str::to_string);
        let favorites = links.favorites_for(&id);

        Ok(Self {
            id,
            full_name,
            email,
            favorites,
        })
    }
}

pub(crate) fn non_blank(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}

impl UserResource for UserProjection {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> IdentityRecord {
        IdentityRecord::new("u1")
            .with_full_name("Jane Doe")
            .with_email("jane@example.com")
    }

    #[test]
    fn projects_all_fields() {
        let user = UserProjection::from_record("u1", &jane(), &LinkBuilder::default()).unwrap();
        assert_eq!(user.id().as_str(), "u1");
        assert_eq!(user.full_name(), "Jane Doe");
        assert_eq!(user.email(), Some("jane@example.com"));
        assert_eq!(user.favorites().href(), "/blue/rest/users/u1/favorites/");
        assert_eq!(user.favorites().owner(), user.id());
    }

    #[test]
    fn missing_or_blank_id_fails_fast() {
        let links = LinkBuilder::default();
        for record in [
            IdentityRecord::default().with_full_name("Ghost"),
            IdentityRecord::new(""),
            IdentityRecord::new("   "),
        ] {
            let err = UserProjection::from_record("ghost", &record, &links).unwrap_err();
            assert!(matches!(
                err,
                DomainError::MissingIdentifier { ref requested, source_name: LOCAL_SOURCE }
                    if requested == "ghost"
            ));
        }
    }

    #[test]
    fn other_fields_may_be_absent() {
        let user =
            UserProjection::from_record("u2", &IdentityRecord::new("u2"), &LinkBuilder::default())
                .unwrap();
        assert_eq!(user.full_name(), "u2");
        assert_eq!(user.email(), None);

        let blank = IdentityRecord::new("u3").with_full_name(" ").with_email("");
        let user = UserProjection::from_record("u3", &blank, &LinkBuilder::default()).unwrap();
        assert_eq!(user.full_name(), "u3");
        assert_eq!(user.email(), None);
    }

    #[test]
    fn same_record_projects_identically() {
        let links = LinkBuilder::default();
        let a = UserProjection::from_record("u1", &jane(), &links).unwrap();
        let b = UserProjection::from_record("u1", &jane(), &links).unwrap();
        assert_eq!(a.id(), b.id());
        assert_eq!(a.full_name(), b.full_name());
        assert_eq!(a.favorites(), b.favorites());
    }

    #[test]
    fn record_accepts_both_name_spellings() {
        let camel: IdentityRecord =
            serde_json::from_str(r#"{"id":"u1","fullName":"Jane Doe"}"#).unwrap();
        let snake: IdentityRecord =
            serde_json::from_str(r#"{"id":"u1","full_name":"Jane Doe"}"#).unwrap();
        assert_eq!(camel, snake);
        assert!(serde_json::from_str::<IdentityRecord>(r#"{"id":"u1","nick":"jd"}"#).is_err());
    }

    #[test]
    fn resource_name_matches_type_name() {
        assert!(std::any::type_name::<UserProjection>().ends_with(UserProjection::RESOURCE));
    }
}
