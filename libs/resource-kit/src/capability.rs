//! Capability tags and their discovery.
//!
//! A resource type declares that it fulfils a named role ("is a user", "is a
//! pipeline", ...) by submitting a [`CapabilityEntry`] through `inventory`.
//! Generic API tooling then finds resources by tag without naming concrete types.
//!
//! ```rust,ignore
//! resource_kit::inventory::submit! {
//!     resource_kit::CapabilityEntry {
//!         tag: "io.example.Thing",
//!         resource: "ThingProjection",
//!         fields: thing_fields,
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

use crate::export::{schema_validate, FieldMeta, SchemaError};

/// Static registration of one resource type under one capability tag.
#[derive(Debug)]
pub struct CapabilityEntry {
    pub tag: &'static str,
    /// Name of the concrete resource type.
    pub resource: &'static str,
    /// Exported fields of the resource, in wire order.
    pub fields: fn() -> Vec<FieldMeta>,
}

inventory::collect!(CapabilityEntry);

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("capability entry for resource '{resource}' has an empty tag")]
    EmptyTag { resource: &'static str },

    #[error("resource '{resource}' registered twice under capability '{tag}'")]
    Duplicate {
        tag: &'static str,
        resource: &'static str,
    },

    #[error("invalid schema for capability '{tag}': {source}")]
    InvalidSchema {
        tag: &'static str,
        #[source]
        source: SchemaError,
    },
}

/// All capability registrations, indexed by tag.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    by_tag: BTreeMap<&'static str, Vec<&'static CapabilityEntry>>,
}

impl CapabilityRegistry {
    /// Collect every entry submitted through `inventory` in the final binary.
    pub fn discover() -> Result<Self, CapabilityError> {
        let registry = Self::from_entries(inventory::iter::<CapabilityEntry>)?;
        tracing::debug!(tags = registry.by_tag.len(), "capability registry built");
        Ok(registry)
    }

    /// Build from an explicit set of entries, validating each one.
    pub fn from_entries(
        entries: impl IntoIterator<Item = &'static CapabilityEntry>,
    ) -> Result<Self, CapabilityError> {
        let mut by_tag: BTreeMap<&'static str, Vec<&'static CapabilityEntry>> = BTreeMap::new();
        for entry in entries {
            if entry.tag.trim().is_empty() {
                return Err(CapabilityError::EmptyTag {
                    resource: entry.resource,
                });
            }
            let fields = (entry.fields)();
            schema_validate(entry.resource, &fields).map_err(|source| {
                CapabilityError::InvalidSchema {
                    tag: entry.tag,
                    source,
                }
            })?;

            let slot = by_tag.entry(entry.tag).or_default();
            if slot.iter().any(|e| e.resource == entry.resource) {
                return Err(CapabilityError::Duplicate {
                    tag: entry.tag,
                    resource: entry.resource,
                });
            }
            slot.push(entry);
        }
        Ok(Self { by_tag })
    }

    /// Resources registered under `tag` (empty if none).
    pub fn resources_for(&self, tag: &str) -> &[&'static CapabilityEntry] {
        self.by_tag.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_capability(&self, resource: &str, tag: &str) -> bool {
        self.resources_for(tag).iter().any(|e| e.resource == resource)
    }

    /// Every tag `resource` is registered under, sorted.
    pub fn capabilities_of(&self, resource: &str) -> Vec<&'static str> {
        self.by_tag
            .iter()
            .filter(|(_, entries)| entries.iter().any(|e| e.resource == resource))
            .map(|(tag, _)| *tag)
            .collect()
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_tag.keys().copied()
    }
}
