//! Plain-text rendering of characters
//!
//! Link fields are shown by resolved name. The live cache is consulted first
//! since it carries local renames; a record's own snapshot covers links the
//! cache no longer holds after a reset.

use crate::model::{Character, SCALAR_ATTRIBUTES};
use crate::resource::{LinkedResource, ResourceKind};
use crate::store::{CharacterRecord, RecordStore};
use std::fmt::Write;

const LINK_KINDS: [ResourceKind; 5] = [
    ResourceKind::Planet,
    ResourceKind::Film,
    ResourceKind::Species,
    ResourceKind::Vehicle,
    ResourceKind::Starship,
];

/// Best known payload for a link of `record`
pub fn lookup(store: &RecordStore, record: &CharacterRecord, url: &str) -> Option<LinkedResource> {
    store
        .get_resource_data(url)
        .or_else(|| record.resource(url).cloned())
}

/// Label for the `index`th link in a list, "Link N" when unresolved
pub fn link_label(store: &RecordStore, record: &CharacterRecord, url: &str, index: usize) -> String {
    match lookup(store, record, url) {
        Some(resource) if !resource.display_name().is_empty() => resource.display_name().to_string(),
        _ => format!("Link {}", index + 1),
    }
}

/// Multi-line card for the list view
pub fn render_card(store: &RecordStore, record: &CharacterRecord) -> String {
    let character = &record.character;
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", character.name);
    for (label, field) in SCALAR_ATTRIBUTES {
        if let Some(value) = character.attribute(field).filter(|v| !v.is_empty()) {
            let _ = writeln!(out, "  {}: {}", label, value);
        }
    }

    for kind in LINK_KINDS {
        let urls = character.links_of(kind);
        if urls.is_empty() {
            continue;
        }
        let labels: Vec<String> = urls
            .iter()
            .enumerate()
            .map(|(i, url)| link_label(store, record, url, i))
            .collect();
        let _ = writeln!(out, "  {}: {}", kind.field_label(), labels.join(", "));
    }

    out
}

/// Field values shown by the editor: resolved names, raw URL when unresolved
pub fn form_values(store: &RecordStore, record: &CharacterRecord) -> Vec<(&'static str, String)> {
    let character: &Character = &record.character;
    let mut values: Vec<(&'static str, String)> = SCALAR_ATTRIBUTES
        .iter()
        .map(|(label, field)| (*label, character.attribute(field).unwrap_or_default().to_string()))
        .collect();

    for kind in LINK_KINDS {
        let joined = character
            .links_of(kind)
            .iter()
            .map(|url| match lookup(store, record, url) {
                Some(resource) if !resource.display_name().is_empty() => {
                    resource.display_name().to_string()
                }
                _ => url.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        values.push((kind.field_label(), joined));
    }

    values
}

/// Detail view: editor fields followed by optional per-resource details
pub fn render_detail(store: &RecordStore, record: &CharacterRecord, with_details: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.character.name);
    let _ = writeln!(out, "{}", "-".repeat(record.character.name.len().max(1)));

    for (label, value) in form_values(store, record) {
        let _ = writeln!(out, "{:<12} {}", format!("{}:", label), value);
    }

    if with_details {
        for link in record.character.link_urls() {
            let _ = writeln!(out);
            match lookup(store, record, link.url) {
                Some(resource) => {
                    let _ = writeln!(out, "[{}] {}", resource.kind(), link.url);
                    for (label, value) in resource.details() {
                        let _ = writeln!(out, "  {}: {}", label, value);
                    }
                }
                None => {
                    let _ = writeln!(out, "[{}] {} (unavailable)", link.kind, link.url);
                }
            }
        }
    }

    out
}

/// Pagination footer
pub fn render_footer(store: &RecordStore, page: u32) -> String {
    format!(
        "Page {} of {} ({} total)",
        page,
        store.page_count().max(1),
        store.count()
    )
}
