//! Wikipedia-backed page resolver: HTTP fetch plus infobox extraction.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::PageResolver;
use crate::config::SourceConfig;
use crate::error::{InfluenceError, Result};
use crate::graph::{RawLink, RelationshipLists};

const INFLUENCED_BY_HEADER: &str = "Influenced by";
const INFLUENCED_HEADER: &str = "Influenced";

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| InfluenceError::Parse(format!("invalid selector {s:?}: {e:?}")))
}

/// Extracts "Influenced by" / "Influenced" link lists from an article infobox.
///
/// The infobox lays each list out as a header row (`th`) followed by a row
/// whose cell holds the links.
pub struct InfoboxExtractor {
    rows: Selector,
    header: Selector,
    links: Selector,
}

impl InfoboxExtractor {
    pub fn new(row_selector: &str) -> Result<Self> {
        Ok(Self {
            rows: parse_selector(row_selector)?,
            header: parse_selector("th")?,
            links: parse_selector("td > a")?,
        })
    }

    /// Extract both relationship lists from a page. Pages without an infobox
    /// yield empty lists.
    pub fn extract(&self, html: &str) -> RelationshipLists {
        let doc = Html::parse_document(html);
        let mut lists = RelationshipLists::default();

        for row in doc.select(&self.rows) {
            let Some(th) = row.select(&self.header).next() else {
                continue;
            };
            let header = th.text().collect::<String>();
            let target = match header.trim() {
                INFLUENCED_BY_HEADER => &mut lists.influenced_by,
                INFLUENCED_HEADER => &mut lists.influenced,
                _ => continue,
            };
            let Some(next) = row.next_siblings().find_map(ElementRef::wrap) else {
                continue;
            };
            *target = self.collect_links(next);
        }

        lists
    }

    fn collect_links(&self, row: ElementRef<'_>) -> Vec<RawLink> {
        row.select(&self.links)
            .map(|a| {
                let locator = a
                    .value()
                    .attr("href")
                    .map(str::trim)
                    .filter(|href| !href.is_empty() && !href.starts_with('#'))
                    .map(str::to_string);
                RawLink {
                    name: a.text().collect::<String>(),
                    locator,
                }
            })
            .collect()
    }
}

/// Resolves locators (article paths such as `/wiki/Go_(programming_language)`)
/// against a Wikipedia base URL.
pub struct WikipediaResolver {
    client: Client,
    base_url: Url,
    extractor: InfoboxExtractor,
}

impl WikipediaResolver {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("langinfluence")),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| InfluenceError::Config(format!("invalid base_url {}: {}", config.base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            extractor: InfoboxExtractor::new(&config.row_selector)?,
        })
    }

    /// Absolute URL of the page behind a locator.
    pub fn page_url(&self, locator: &str) -> Result<Url> {
        self.base_url
            .join(locator)
            .map_err(|e| InfluenceError::InvalidLocator(format!("{locator}: {e}")))
    }
}

impl PageResolver for WikipediaResolver {
    async fn resolve(&self, locator: &str) -> Result<RelationshipLists> {
        let url = self.page_url(locator)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfluenceError::Fetch(format!("status {} for {}", status, url)));
        }

        let body = response.text().await?;
        Ok(self.extractor.extract(&body))
    }
}
