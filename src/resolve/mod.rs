//! Page resolution: locator -> relationship lists.
//!
//! The traversal only depends on [`PageResolver`]; [`WikipediaResolver`] is the
//! network-backed implementation used by the binary.

mod wikipedia;

pub use wikipedia::{InfoboxExtractor, WikipediaResolver};

use crate::error::Result;
use crate::graph::RelationshipLists;

/// Fetches the page behind a locator and extracts both relationship lists.
///
/// A page without any relationship data resolves to empty lists; an error
/// means the page could not be retrieved or parsed.
#[allow(async_fn_in_trait)]
pub trait PageResolver {
    async fn resolve(&self, locator: &str) -> Result<RelationshipLists>;
}
