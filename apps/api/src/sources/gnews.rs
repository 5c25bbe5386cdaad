#![allow(dead_code)]

//! GNews v4 client, behind the `/api/news/proxy/gnews` endpoint.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::{get_json, provider_client, SourceError};
use crate::models::article::Article;

const GNEWS_API_URL: &str = "https://gnews.io/api/v4";

#[derive(Debug, Clone, Default)]
pub struct GNewsParams {
    pub query: Option<String>,
    pub lang: Option<String>,
    pub country: Option<String>,
    pub max: u32,
    pub page: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GNewsResponse {
    pub total_articles: u64,
    #[serde(default)]
    pub articles: Vec<GNewsArticle>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GNewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub source: GNewsSource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GNewsSource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<GNewsArticle> for Article {
    fn from(a: GNewsArticle) -> Self {
        Article {
            title: a.title,
            description: a.description.unwrap_or_default(),
            url: a.url,
            image_url: a.image,
            source: a.source.name.unwrap_or_else(|| "unknown".to_string()),
            published_at: a.published_at,
            author: None,
            keywords: vec![],
            categories: vec!["general".to_string()],
        }
    }
}

#[derive(Clone)]
pub struct GNewsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GNewsClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GNEWS_API_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: provider_client(),
            api_key,
            base_url: base_url.into(),
        }
    }

    pub async fn top_headlines(&self, params: &GNewsParams) -> Result<GNewsResponse, SourceError> {
        self.fetch("top-headlines", params).await
    }

    pub async fn search(&self, params: &GNewsParams) -> Result<GNewsResponse, SourceError> {
        self.fetch("search", params).await
    }

    async fn fetch(&self, endpoint: &str, params: &GNewsParams) -> Result<GNewsResponse, SourceError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut query: Vec<(&str, String)> = vec![
            ("apikey", self.api_key.clone()),
            ("max", params.max.to_string()),
            ("page", params.page.to_string()),
        ];
        if let Some(q) = &params.query {
            query.push(("q", q.clone()));
        }
        if let Some(lang) = &params.lang {
            query.push(("lang", lang.clone()));
        }
        if let Some(country) = &params.country {
            query.push(("country", country.clone()));
        }

        get_json(|| self.client.get(&url).query(&query)).await
    }
}
