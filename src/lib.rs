pub mod config;
pub mod error;
pub mod graph;
pub mod report;
pub mod resolve;

pub use config::Config;
pub use error::{InfluenceError, Result};
pub use graph::{Crawler, CrawlSummary, Entity, EntityId, Registry};
pub use report::{LineReporter, VisitRecord, VisitReporter};
pub use resolve::{PageResolver, WikipediaResolver};
