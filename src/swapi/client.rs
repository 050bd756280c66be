//! SWAPI Client
//!
//! Builds endpoint URLs from a base URL and decodes the people endpoints.

use super::http::HttpClient;
use crate::model::Character;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// One page of the people listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PeoplePage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Character>,
}

/// Main SWAPI client
#[derive(Clone, Debug)]
pub struct SwapiClient {
    pub http: HttpClient,
    base_url: String,
}

impl SwapiClient {
    /// Create a new client rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!("Unsupported URL scheme: {}", parsed.scheme()));
        }

        Ok(Self {
            http: HttpClient::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch any resource by absolute URL
    pub async fn get(&self, url: &str) -> Result<Value> {
        self.http.get(url, &[]).await
    }

    // =========================================================================
    // People endpoints
    // =========================================================================

    /// Build the people listing URL
    pub fn people_url(&self) -> String {
        format!("{}/people/", self.base_url)
    }

    /// Build the URL of a single person
    pub fn person_url(&self, id: &str) -> String {
        format!("{}/people/{}/", self.base_url, id)
    }

    /// Fetch one page of people, filtered by `search` when non-empty
    pub async fn list_people(&self, page: u32, search: &str) -> Result<PeoplePage> {
        let mut query = vec![("page", page.to_string())];
        if !search.is_empty() {
            query.push(("search", search.to_string()));
        }

        self.http
            .get_json(&self.people_url(), &query)
            .await
            .with_context(|| format!("Failed to list people (page {})", page))
    }

    /// Fetch a single person by short id
    pub async fn get_person(&self, id: &str) -> Result<Character> {
        self.http
            .get_json(&self.person_url(id), &[])
            .await
            .with_context(|| format!("Failed to fetch character {}", id))
    }
}
