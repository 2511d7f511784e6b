use serde::ser::{Serialize, SerializeMap, Serializer};

use super::policy::{Caller, VisibilityPolicy};
use super::schema::{FieldMeta, Schema};

/// A resource viewed through its schema by one caller.
///
/// Serializes as a JSON object keyed by wire name, in schema order. Fields the
/// policy hides are left out entirely; visible fields without a value are `null`.
pub struct Exported<'a, T: ?Sized> {
    resource: &'a T,
    schema: &'a Schema<T>,
    caller: &'a Caller,
    policy: &'a dyn VisibilityPolicy,
}

impl<'a, T: ?Sized> Exported<'a, T> {
    pub fn new(
        resource: &'a T,
        schema: &'a Schema<T>,
        caller: &'a Caller,
        policy: &'a dyn VisibilityPolicy,
    ) -> Self {
        Self {
            resource,
            schema,
            caller,
            policy,
        }
    }

    /// Wire names that this caller gets to see.
    pub fn visible_fields(&self) -> Vec<&'static str> {
        self.visible().map(|m| m.wire_name).collect()
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn visible(&self) -> impl Iterator<Item = &FieldMeta> + '_ {
        self.schema
            .fields()
            .iter()
            .map(|f| &f.meta)
            .filter(|m| self.policy.is_visible(self.caller, m))
    }
}

impl<T: ?Sized> Serialize for Exported<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for field in self.schema.fields() {
            if !self.policy.is_visible(self.caller, &field.meta) {
                tracing::trace!(
                    resource = self.schema.resource(),
                    field = field.meta.wire_name,
                    "field suppressed for caller"
                );
                continue;
            }
            map.serialize_entry(field.meta.wire_name, &(field.read)(self.resource))?;
        }
        map.end()
    }
}
