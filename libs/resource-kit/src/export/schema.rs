use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// Who may see a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Always exported.
    Public,
    /// Exported only when the visibility policy allows it for the caller.
    Restricted,
}

/// Wire-level description of one exported field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldMeta {
    pub wire_name: &'static str,
    pub visibility: Visibility,
}

impl FieldMeta {
    pub const fn public(wire_name: &'static str) -> Self {
        Self {
            wire_name,
            visibility: Visibility::Public,
        }
    }

    pub const fn restricted(wire_name: &'static str) -> Self {
        Self {
            wire_name,
            visibility: Visibility::Restricted,
        }
    }

    pub fn is_restricted(&self) -> bool {
        self.visibility == Visibility::Restricted
    }
}

/// Serialized form of a reference to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Value read from a resource for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Link(Link),
    Null,
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(v: Option<&'a str>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Text)
    }
}

impl Serialize for FieldValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Link(link) => link.serialize(serializer),
            FieldValue::Null => serializer.serialize_none(),
        }
    }
}

/// Accessor that reads one field out of a resource.
pub type Reader<T> = for<'a> fn(&'a T) -> FieldValue<'a>;

pub struct Field<T: ?Sized> {
    pub meta: FieldMeta,
    pub read: Reader<T>,
}

impl<T: ?Sized> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            meta: self.meta,
            read: self.read,
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("meta", &self.meta).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema '{resource}' has a field with an empty wire name")]
    EmptyWireName { resource: &'static str },

    #[error("schema '{resource}' exports '{wire_name}' more than once")]
    DuplicateWireName {
        resource: &'static str,
        wire_name: &'static str,
    },
}

/// Ordered table of exported fields for resource type `T`.
pub struct Schema<T: ?Sized> {
    resource: &'static str,
    fields: Vec<Field<T>>,
}

impl<T: ?Sized> std::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("resource", &self.resource)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<T: ?Sized> Schema<T> {
    pub fn builder(resource: &'static str) -> SchemaBuilder<T> {
        SchemaBuilder {
            resource,
            fields: Vec::new(),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    pub fn metas(&self) -> Vec<FieldMeta> {
        self.fields.iter().map(|f| f.meta).collect()
    }

    pub fn field(&self, wire_name: &str) -> Option<&FieldMeta> {
        self.fields
            .iter()
            .map(|f| &f.meta)
            .find(|m| m.wire_name == wire_name)
    }

    /// Check that wire names are non-empty and unique.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_metas(self.resource, self.fields.iter().map(|f| &f.meta))
    }
}

pub(crate) fn validate_metas<'m>(
    resource: &'static str,
    metas: impl IntoIterator<Item = &'m FieldMeta>,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for m in metas {
        if m.wire_name.trim().is_empty() {
            return Err(SchemaError::EmptyWireName { resource });
        }
        if !seen.insert(m.wire_name) {
            return Err(SchemaError::DuplicateWireName {
                resource,
                wire_name: m.wire_name,
            });
        }
    }
    Ok(())
}

pub struct SchemaBuilder<T: ?Sized> {
    resource: &'static str,
    fields: Vec<Field<T>>,
}

impl<T: ?Sized> SchemaBuilder<T> {
    pub fn public(self, wire_name: &'static str, read: Reader<T>) -> Self {
        self.field(FieldMeta::public(wire_name), read)
    }

    pub fn restricted(self, wire_name: &'static str, read: Reader<T>) -> Self {
        self.field(FieldMeta::restricted(wire_name), read)
    }

    pub fn field(mut self, meta: FieldMeta, read: Reader<T>) -> Self {
        self.fields.push(Field { meta, read });
        self
    }

    pub fn build(self) -> Schema<T> {
        Schema {
            resource: self.resource,
            fields: self.fields,
        }
    }
}
