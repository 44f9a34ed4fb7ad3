//! Wikipedia lookup used to enrich notes.
//!
//! Lookups are best effort: any failure is logged and turns into "no
//! enrichment", it never fails the note being added.

use crate::store::Enrichment;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("notebook-service/", env!("CARGO_PKG_VERSION"));

/// Source of note enrichment
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Look up `search_term`; `None` when there is nothing to attach
    async fn lookup(&self, search_term: &str) -> Option<Enrichment>;
}

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected response: {0}")]
    Malformed(&'static str),
}

/// Top search hit: canonical link and, when reported, the page title
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchHit {
    link: String,
    title: Option<String>,
}

pub struct WikipediaClient {
    api_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl WikipediaClient {
    pub fn new(api_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            api_url: api_url.to_string(),
            client,
            timeout,
        }
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<Value, EnrichmentError> {
        let resp = self
            .client
            .get(&self.api_url)
            .query(params)
            .timeout(self.timeout)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(EnrichmentError::Status(resp.status()));
        }

        Ok(resp.json::<Value>().await?)
    }

    /// Top match for `term` via the opensearch API.
    /// The response is `[term, [titles], [descriptions], [links]]`.
    async fn search(&self, term: &str) -> Result<Option<SearchHit>, EnrichmentError> {
        let data = self
            .get_json(&[
                ("action", "opensearch"),
                ("search", term),
                ("limit", "1"),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .await?;

        let parts = data
            .as_array()
            .ok_or(EnrichmentError::Malformed("opensearch result is not an array"))?;

        let first_str = |idx: usize| {
            parts
                .get(idx)
                .and_then(Value::as_array)
                .and_then(|items| items.first())
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Ok(first_str(3).map(|link| SearchHit {
            link,
            title: first_str(1),
        }))
    }

    /// Plain-text introduction of the page titled `title` ("" if none)
    async fn fetch_extract(&self, title: &str) -> Result<String, EnrichmentError> {
        let data = self
            .get_json(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("titles", title),
                ("format", "json"),
            ])
            .await?;

        let extract = data
            .get("query")
            .and_then(|q| q.get("pages"))
            .and_then(Value::as_object)
            .and_then(|pages| pages.values().next())
            .and_then(|page| page.get("extract"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        Ok(extract.to_string())
    }
}

#[async_trait]
impl Enricher for WikipediaClient {
    async fn lookup(&self, search_term: &str) -> Option<Enrichment> {
        let term = search_term.trim();
        if term.is_empty() {
            return None;
        }

        let hit = match self.search(term).await {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                log::info!("[WIKI] No match for '{}'", term);
                return None;
            }
            Err(e) => {
                log::warn!("[WIKI] Enrichment unavailable for '{}': {}", term, e);
                return None;
            }
        };

        let extract = match &hit.title {
            Some(title) => self.fetch_extract(title).await.unwrap_or_else(|e| {
                log::warn!("[WIKI] Extract fetch failed for '{}': {}", title, e);
                String::new()
            }),
            None => String::new(),
        };

        Some(Enrichment {
            link: hit.link,
            extract,
        })
    }
}
