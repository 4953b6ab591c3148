//! Turns extracted (name, locator) pairs into registry entities.

use std::sync::OnceLock;

use regex::Regex;

use super::{EntityId, RawLink, Registry};

fn qualifier_regex() -> &'static Regex {
    static QUALIFIER: OnceLock<Regex> = OnceLock::new();
    QUALIFIER.get_or_init(|| {
        Regex::new(r"(?i)\(\s*programming\s+language\s*\)").expect("Invalid regex pattern")
    })
}

/// Canonical display name for a link text.
///
/// Removes the `(programming language)` disambiguation qualifier and collapses
/// whitespace. Returns `None` when nothing is left.
pub fn canonical_name(raw: &str) -> Option<String> {
    let stripped = qualifier_regex().replace_all(raw, " ");
    let name = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Resolve extracted links to entities, in document order.
///
/// Names already in the registry resolve to the existing entity; new names are
/// interned as unvisited entities carrying the link's locator. Entries without
/// a usable name or locator are skipped.
pub fn build(registry: &mut Registry, raw: &[RawLink]) -> Vec<EntityId> {
    let mut out = Vec::with_capacity(raw.len());

    for link in raw {
        let Some(locator) = link.locator.as_deref().map(str::trim).filter(|l| !l.is_empty()) else {
            log::debug!("Skipping link without locator: {:?}", link.name);
            continue;
        };
        let Some(name) = canonical_name(&link.name) else {
            log::debug!("Skipping link without name: {}", locator);
            continue;
        };

        out.push(registry.intern(&name, locator));
    }

    out
}
