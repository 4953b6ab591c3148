//! Depth-first crawl over the influence graph.

use super::{build, canonical_name, EntityId, Registry, VisitStatus};
use crate::report::{VisitRecord, VisitReporter};
use crate::resolve::PageResolver;

/// Outcome of one crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Entities visited during this crawl, failed ones included.
    pub visited: usize,
    /// Entities whose page could not be resolved.
    pub failed: usize,
}

/// Drives the traversal: owns the registry, asks the resolver for each page
/// and reports every visit once.
pub struct Crawler<R, P> {
    resolver: R,
    reporter: P,
    registry: Registry,
}

impl<R: PageResolver, P: VisitReporter> Crawler<R, P> {
    pub fn new(resolver: R, reporter: P) -> Self {
        Self {
            resolver,
            reporter,
            registry: Registry::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    pub fn into_parts(self) -> (Registry, P) {
        (self.registry, self.reporter)
    }

    /// Seed the root entity and crawl everything reachable from it.
    pub async fn crawl(&mut self, name: &str, locator: &str) -> CrawlSummary {
        let name = canonical_name(name).unwrap_or_else(|| name.trim().to_string());
        let root = self.registry.intern(&name, locator);
        log::info!("Crawling from {} ({})", name, locator);
        self.visit(root).await
    }

    /// Visit `root` and every entity reachable from it that has not been
    /// visited yet, in pre-order: an entity is reported before any of its
    /// neighbors, "influenced by" neighbors before "influenced" ones.
    ///
    /// Uses an explicit stack; children are pushed in reverse so they pop in
    /// list order. The visited check happens on pop, which matches a recursive
    /// visit guarding on entry.
    pub async fn visit(&mut self, root: EntityId) -> CrawlSummary {
        let mut summary = CrawlSummary::default();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            // Marked before fetching so anything pointing back at this entity
            // (including itself) is skipped.
            if !self.registry.register(id) {
                continue;
            }
            summary.visited += 1;

            let locator = self.registry.get(id).locator.clone();
            match self.resolver.resolve(&locator).await {
                Ok(lists) => {
                    let influenced_by = build(&mut self.registry, &lists.influenced_by);
                    let influenced = build(&mut self.registry, &lists.influenced);
                    let entity = self.registry.get_mut(id);
                    entity.influenced_by = influenced_by;
                    entity.influenced = influenced;
                }
                Err(e) => {
                    let entity = self.registry.get_mut(id);
                    log::warn!("Failed to resolve {} ({}): {}", entity.name, locator, e);
                    entity.status = VisitStatus::Failed(e.to_string());
                    summary.failed += 1;
                }
            }

            let record = self.record(id);
            self.reporter.report(&record);

            let entity = self.registry.get(id);
            for child in entity
                .influenced
                .iter()
                .rev()
                .chain(entity.influenced_by.iter().rev())
            {
                if !self.registry.is_visited(*child) {
                    stack.push(*child);
                }
            }
        }

        log::info!(
            "Crawl finished: {} visited, {} failed, {} known",
            summary.visited,
            summary.failed,
            self.registry.len()
        );
        summary
    }

    fn record(&self, id: EntityId) -> VisitRecord {
        let entity = self.registry.get(id);
        VisitRecord {
            name: entity.name.clone(),
            influenced_by: self.registry.names(&entity.influenced_by),
            influenced: self.registry.names(&entity.influenced),
            error: match &entity.status {
                VisitStatus::Failed(message) => Some(message.clone()),
                _ => None,
            },
        }
    }
}
