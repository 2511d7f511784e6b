use once_cell::sync::Lazy;
use resource_kit::export::{FieldMeta, FieldValue, Schema};

use crate::contract::model::{UserResource, EMAIL, FAVORITES, FULL_NAME, ID};

/// Any user resource, whatever identity source backs it.
pub type AnyUser = dyn UserResource;

fn read_id(u: &AnyUser) -> FieldValue<'_> {
    FieldValue::Text(u.id().as_str())
}

fn read_full_name(u: &AnyUser) -> FieldValue<'_> {
    FieldValue::Text(u.full_name())
}

fn read_email(u: &AnyUser) -> FieldValue<'_> {
    u.email().into()
}

fn read_favorites(u: &AnyUser) -> FieldValue<'_> {
    FieldValue::Link(u.favorites().link())
}

static USER_SCHEMA: Lazy<Schema<AnyUser>> = Lazy::new(|| {
    Schema::builder("BlueUser")
        .public(ID, read_id)
        .public(FULL_NAME, read_full_name)
        .restricted(EMAIL, read_email)
        .public(FAVORITES, read_favorites)
        .build()
});

/// Export schema shared by every `UserResource` implementation.
pub fn user_schema() -> &'static Schema<AnyUser> {
    &USER_SCHEMA
}

/// Field list submitted with the capability registrations.
pub fn user_fields() -> Vec<FieldMeta> {
    user_schema().metas()
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_kit::export::Visibility;

    #[test]
    fn wire_names_and_visibility() {
        let schema = user_schema();
        assert!(schema.validate().is_ok());
        let wire: Vec<_> = user_fields().iter().map(|f| f.wire_name).collect();
        assert_eq!(wire, vec!["id", "fullName", "email", "favorites"]);

        assert_eq!(schema.field(EMAIL).unwrap().visibility, Visibility::Restricted);
        for name in [ID, FULL_NAME, FAVORITES] {
            assert_eq!(schema.field(name).unwrap().visibility, Visibility::Public);
        }
    }
}
