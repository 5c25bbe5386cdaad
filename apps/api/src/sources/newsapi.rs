#![allow(dead_code)]

//! NewsAPI.org v2 client, behind the `/api/news/proxy/newsapi` endpoint.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::{get_json, provider_client, SourceError};
use crate::models::article::Article;

const NEWSAPI_URL: &str = "https://newsapi.org/v2";

#[derive(Debug, Clone, Default)]
pub struct NewsApiParams {
    pub query: Option<String>,
    pub country: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    pub status: String,
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    pub source: NewsApiSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<NewsApiArticle> for Article {
    fn from(a: NewsApiArticle) -> Self {
        Article {
            title: a.title.unwrap_or_else(|| "Untitled".to_string()),
            description: a.description.unwrap_or_default(),
            url: a.url,
            image_url: a.url_to_image,
            source: a.source.name.unwrap_or_else(|| "unknown".to_string()),
            published_at: a.published_at,
            author: a.author,
            keywords: vec![],
            categories: vec!["general".to_string()],
        }
    }
}

#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, NEWSAPI_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: provider_client(),
            api_key,
            base_url: base_url.into(),
        }
    }

    pub async fn top_headlines(
        &self,
        params: &NewsApiParams,
    ) -> Result<NewsApiResponse, SourceError> {
        self.fetch("top-headlines", params).await
    }

    pub async fn everything(&self, params: &NewsApiParams) -> Result<NewsApiResponse, SourceError> {
        self.fetch("everything", params).await
    }

    async fn fetch(
        &self,
        endpoint: &str,
        params: &NewsApiParams,
    ) -> Result<NewsApiResponse, SourceError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut query: Vec<(&str, String)> = vec![
            ("page", params.page.to_string()),
            ("pageSize", params.page_size.to_string()),
        ];
        if let Some(q) = &params.query {
            query.push(("q", q.clone()));
        }
        if let Some(country) = &params.country {
            query.push(("country", country.clone()));
        }

        // NewsAPI authenticates via header, not query string
        get_json(|| {
            self.client
                .get(&url)
                .header("X-Api-Key", &self.api_key)
                .query(&query)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_top_headlines_sends_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(header("X-Api-Key", "secret"))
            .and(query_param("country", "us"))
            .and(query_param("pageSize", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [{
                    "source": { "id": "bbc-news", "name": "BBC News" },
                    "author": "Staff",
                    "title": "Markets rally",
                    "description": "Stocks climbed on Monday",
                    "url": "https://example.com/markets",
                    "urlToImage": "https://example.com/markets.jpg",
                    "publishedAt": "2024-04-01T12:00:00Z",
                    "content": "Stocks climbed..."
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = NewsApiClient::with_base_url("secret".to_string(), server.uri());
        let resp = client
            .top_headlines(&NewsApiParams {
                country: Some("us".to_string()),
                page: 1,
                page_size: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(resp.status, "ok");
        assert_eq!(resp.total_results, 1);

        let article: Article = resp.articles[0].clone().into();
        assert_eq!(article.source, "BBC News");
        assert_eq!(article.author.as_deref(), Some("Staff"));
        assert_eq!(
            article.image_url.as_deref(),
            Some("https://example.com/markets.jpg")
        );
    }

    #[tokio::test]
    async fn test_everything_endpoint_with_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(query_param("q", "rust language"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 0,
                "articles": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = NewsApiClient::with_base_url("secret".to_string(), server.uri());
        let resp = client
            .everything(&NewsApiParams {
                query: Some("rust language".to_string()),
                page: 1,
                page_size: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(resp.articles.is_empty());
    }

    #[tokio::test]
    async fn test_null_title_becomes_untitled() {
        let raw = NewsApiArticle {
            source: NewsApiSource {
                id: None,
                name: None,
            },
            author: None,
            title: None,
            description: None,
            url: "https://example.com/x".to_string(),
            url_to_image: None,
            published_at: None,
            content: None,
        };
        let article: Article = raw.into();
        assert_eq!(article.title, "Untitled");
        assert_eq!(article.source, "unknown");
    }
}
