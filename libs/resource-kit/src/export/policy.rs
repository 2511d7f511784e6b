use std::collections::BTreeSet;

use super::schema::{FieldMeta, Visibility};

/// Permission that unlocks restricted fields under the default policy.
pub const VIEW_RESTRICTED: &str = "view-restricted";

/// The requesting party, as resolved by the authorization layer for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    principal: Option<String>,
    permissions: BTreeSet<String>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(principal: impl Into<String>) -> Self {
        Self {
            principal: Some(principal.into()),
            permissions: BTreeSet::new(),
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.principal.is_none()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Decides whether `field` may be exported to `caller`.
pub trait VisibilityPolicy: Send + Sync {
    fn is_visible(&self, caller: &Caller, field: &FieldMeta) -> bool;
}

impl<F> VisibilityPolicy for F
where
    F: Fn(&Caller, &FieldMeta) -> bool + Send + Sync,
{
    fn is_visible(&self, caller: &Caller, field: &FieldMeta) -> bool {
        self(caller, field)
    }
}

/// Public fields for everyone; restricted fields only for callers holding `permission`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictedFieldPolicy {
    permission: String,
}

impl RestrictedFieldPolicy {
    pub fn new(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
        }
    }

    pub fn permission(&self) -> &str {
        &self.permission
    }
}

impl Default for RestrictedFieldPolicy {
    fn default() -> Self {
        Self::new(VIEW_RESTRICTED)
    }
}

impl VisibilityPolicy for RestrictedFieldPolicy {
    fn is_visible(&self, caller: &Caller, field: &FieldMeta) -> bool {
        match field.visibility {
            Visibility::Public => true,
            Visibility::Restricted => caller.has_permission(&self.permission),
        }
    }
}

/// Never exports restricted fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicOnly;

impl VisibilityPolicy for PublicOnly {
    fn is_visible(&self, _caller: &Caller, field: &FieldMeta) -> bool {
        field.visibility == Visibility::Public
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: FieldMeta = FieldMeta::public("name");
    const SECRET: FieldMeta = FieldMeta::restricted("secret");

    #[test]
    fn caller_builders() {
        let anon = Caller::anonymous();
        assert!(anon.is_anonymous());
        assert_eq!(anon.principal(), None);

        let alice = Caller::authenticated("alice").with_permission("admin");
        assert_eq!(alice.principal(), Some("alice"));
        assert!(alice.has_permission("admin"));
        assert!(!alice.has_permission(VIEW_RESTRICTED));
    }

    #[test]
    fn restricted_policy_requires_permission() {
        let policy = RestrictedFieldPolicy::default();
        let plain = Caller::authenticated("bob");
        let trusted = Caller::authenticated("bob").with_permission(VIEW_RESTRICTED);

        assert!(policy.is_visible(&plain, &NAME));
        assert!(!policy.is_visible(&plain, &SECRET));
        assert!(policy.is_visible(&trusted, &SECRET));
    }

    #[test]
    fn custom_permission_name() {
        let policy = RestrictedFieldPolicy::new("admin");
        assert_eq!(policy.permission(), "admin");
        let admin = Caller::authenticated("root").with_permission("admin");
        let viewer = Caller::authenticated("eve").with_permission(VIEW_RESTRICTED);
        assert!(policy.is_visible(&admin, &SECRET));
        assert!(!policy.is_visible(&viewer, &SECRET));
    }

    #[test]
    fn public_only_hides_restricted_even_for_privileged_callers() {
        let root = Caller::authenticated("root").with_permission(VIEW_RESTRICTED);
        assert!(PublicOnly.is_visible(&root, &NAME));
        assert!(!PublicOnly.is_visible(&root, &SECRET));
    }

    #[test]
    fn closures_are_policies() {
        let only_authenticated =
            |caller: &Caller, field: &FieldMeta| !field.is_restricted() || !caller.is_anonymous();
        assert!(!only_authenticated.is_visible(&Caller::anonymous(), &SECRET));
        assert!(only_authenticated.is_visible(&Caller::authenticated("x"), &SECRET));
    }
}
