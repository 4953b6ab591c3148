//! Influence graph: entity model, registry, builder and traversal.
//!
//! Entities are owned by the [`Registry`] arena and referenced everywhere else
//! through [`EntityId`] handles, so two relationship lists pointing at the same
//! language hold the same handle.

mod builder;
mod registry;
mod traversal;

pub use builder::{build, canonical_name};
pub use registry::Registry;
pub use traversal::{CrawlSummary, Crawler};

use std::fmt;

/// Handle to an entity stored in a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) usize);

/// Visit state of an entity. Never returns to `Unvisited`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitStatus {
    /// Known by name, page not fetched yet.
    Unvisited,
    /// Page fetched and relationships resolved.
    Visited,
    /// Page fetch failed; relationships stay empty.
    Failed(String),
}

/// One node in the influence graph.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Canonical display name (disambiguation qualifier stripped).
    pub name: String,
    /// Locator used to fetch the entity's page; set once at creation.
    pub locator: String,
    pub influenced_by: Vec<EntityId>,
    pub influenced: Vec<EntityId>,
    pub status: VisitStatus,
}

impl Entity {
    pub(crate) fn new(name: String, locator: String) -> Self {
        Self {
            name,
            locator,
            influenced_by: Vec::new(),
            influenced: Vec::new(),
            status: VisitStatus::Unvisited,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, VisitStatus::Failed(_))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A (display text, locator) pair extracted from a page, in document order.
/// A missing locator marks a malformed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub name: String,
    pub locator: Option<String>,
}

impl RawLink {
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: Some(locator.into()),
        }
    }
}

/// Both relationship directions found on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipLists {
    pub influenced_by: Vec<RawLink>,
    pub influenced: Vec<RawLink>,
}
