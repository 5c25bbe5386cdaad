//! The Guardian content API client — the primary provider behind the feed,
//! search and recommendation endpoints.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::{get_json, provider_client, SourceError};

const GUARDIAN_API_URL: &str = "https://content.guardianapis.com";

#[derive(Debug, Clone, Default)]
pub struct GuardianSearchParams {
    pub query: Option<String>,
    pub section: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Deserialize)]
struct GuardianEnvelope {
    response: GuardianSearchBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuardianSearchBody {
    pub total: u64,
    #[serde(default)]
    pub results: Vec<GuardianItem>,
}

/// A raw Guardian search result, before enrichment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianItem {
    pub web_title: String,
    pub web_url: String,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub web_publication_date: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct GuardianClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GuardianClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GUARDIAN_API_URL)
    }

    /// Overridable base URL, for pointing tests at a mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: provider_client(),
            api_key,
            base_url: base_url.into(),
        }
    }

    /// GET /search with the Guardian's kebab-case query parameters.
    pub async fn search(
        &self,
        params: &GuardianSearchParams,
    ) -> Result<GuardianSearchBody, SourceError> {
        let url = format!("{}/search", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("api-key", self.api_key.clone()),
            ("page", params.page.to_string()),
            ("page-size", params.page_size.to_string()),
        ];
        if let Some(q) = &params.query {
            query.push(("q", q.clone()));
        }
        if let Some(section) = &params.section {
            query.push(("section", section.clone()));
        }
        if let Some(from) = &params.from_date {
            query.push(("from-date", from.clone()));
        }
        if let Some(to) = &params.to_date {
            query.push(("to-date", to.clone()));
        }

        let envelope: GuardianEnvelope =
            get_json(|| self.client.get(&url).query(&query)).await?;
        Ok(envelope.response)
    }
}
