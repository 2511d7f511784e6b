//! Capability entries submitted with `inventory` are found by `discover()`.

use resource_kit::export::FieldMeta;
use resource_kit::{CapabilityEntry, CapabilityRegistry};

const WIDGET: &str = "io.example.Widget";

fn widget_fields() -> Vec<FieldMeta> {
    vec![FieldMeta::public("id"), FieldMeta::public("label")]
}

resource_kit::inventory::submit! {
    CapabilityEntry {
        tag: WIDGET,
        resource: "StaticWidget",
        fields: widget_fields,
    }
}

resource_kit::inventory::submit! {
    CapabilityEntry {
        tag: WIDGET,
        resource: "GeneratedWidget",
        fields: widget_fields,
    }
}

#[test]
fn discovers_submitted_entries() {
    let registry = CapabilityRegistry::discover().expect("registry builds");

    let mut names: Vec<_> = registry
        .resources_for(WIDGET)
        .iter()
        .map(|e| e.resource)
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["GeneratedWidget", "StaticWidget"]);

    let entry = registry.resources_for(WIDGET)[0];
    let wire: Vec<_> = (entry.fields)().iter().map(|f| f.wire_name).collect();
    assert_eq!(wire, vec!["id", "label"]);
}

#[test]
fn unknown_tag_has_no_resources() {
    let registry = CapabilityRegistry::discover().expect("registry builds");
    assert!(registry.resources_for("io.example.Nothing").is_empty());
    assert!(registry.tags().any(|t| t == WIDGET));
}
