//! Explicit export schemas.
//!
//! A resource type declares which fields it exports, under which wire names and
//! with which visibility rule. A [`VisibilityPolicy`] decides per caller whether a
//! restricted field may be shown, and [`Exported`] serializes a resource through
//! its schema, omitting every field the policy hides.

mod exported;
mod policy;
mod schema;

pub use exported::Exported;
pub use policy::{Caller, PublicOnly, RestrictedFieldPolicy, VisibilityPolicy, VIEW_RESTRICTED};
pub(crate) use schema::validate_metas as schema_validate;
pub use schema::{
    Field, FieldMeta, FieldValue, Link, Reader, Schema, SchemaBuilder, SchemaError, Visibility,
};
