use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::article::Article;
use crate::news::page_count;
use crate::sources::gnews::GNewsParams;
use crate::sources::guardian::GuardianSearchParams;
use crate::sources::newsapi::NewsApiParams;
use crate::state::AppState;

pub(crate) fn default_page() -> u32 {
    1
}

fn default_feed_size() -> u32 {
    9
}

fn default_search_size() -> u32 {
    6
}

fn default_proxy_size() -> u32 {
    10
}

/// Paged envelope shared by every news-listing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    pub status: &'static str,
    pub total_results: u64,
    pub current_page: u32,
    pub total_pages: u64,
    pub articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    pub category: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_feed_size")]
    pub max_per_page: u32,
}

/// GET /api/news/all
pub async fn get_all_news(
    State(state): State<AppState>,
    Query(params): Query<FeedQuery>,
) -> Result<Json<NewsPage>, AppError> {
    let body = state
        .guardian
        .search(&GuardianSearchParams {
            query: None,
            section: params.category,
            from_date: params.from,
            to_date: params.to,
            page: params.page,
            page_size: params.max_per_page,
        })
        .await?;

    let articles = state.enricher.enrich_all(&body.results).await;

    Ok(Json(NewsPage {
        status: "ok",
        total_results: body.total,
        current_page: params.page,
        total_pages: page_count(body.total, params.max_per_page),
        articles,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_search_size")]
    pub max_per_page: u32,
}

/// GET /api/news/search
pub async fn search_news(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<NewsPage>, AppError> {
    let q = require_query(params.q.as_deref())?;

    let body = state
        .guardian
        .search(&GuardianSearchParams {
            query: Some(q.to_string()),
            section: params.category,
            from_date: params.from,
            to_date: params.to,
            page: params.page,
            page_size: params.max_per_page,
        })
        .await?;

    let articles = state.enricher.enrich_all(&body.results).await;

    Ok(Json(NewsPage {
        status: "ok",
        total_results: body.total,
        current_page: params.page,
        total_pages: page_count(body.total, params.max_per_page),
        articles,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrictSearchQuery {
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_search_size")]
    pub max_per_page: u32,
}

/// GET /api/news/strict-search
///
/// Widens the user's query with entertainment-flavored variants so exact
/// franchise names ("dune", "zelda") surface coverage beyond the news desk.
pub async fn strict_search(
    State(state): State<AppState>,
    Query(params): Query<StrictSearchQuery>,
) -> Result<Json<NewsPage>, AppError> {
    let q = require_query(params.q.as_deref())?;
    let extended = format!("{q} OR {q}+movie OR {q}+game OR {q}+block");

    let body = state
        .guardian
        .search(&GuardianSearchParams {
            query: Some(extended),
            section: None,
            from_date: None,
            to_date: None,
            page: params.page,
            page_size: params.max_per_page,
        })
        .await?;

    let articles = state.enricher.enrich_all(&body.results).await;

    Ok(Json(NewsPage {
        status: "ok",
        total_results: body.total,
        current_page: params.page,
        total_pages: page_count(body.total, params.max_per_page),
        articles,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiProxyQuery {
    pub endpoint: Option<String>,
    pub country: Option<String>,
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_proxy_size")]
    pub page_size: u32,
}

/// GET /api/news/proxy/newsapi
pub async fn proxy_newsapi(
    State(state): State<AppState>,
    Query(params): Query<NewsApiProxyQuery>,
) -> Result<Json<NewsPage>, AppError> {
    let client = state
        .newsapi
        .as_ref()
        .ok_or(AppError::MissingApiKey("NEWSAPI_API_KEY"))?;

    let upstream = NewsApiParams {
        query: params.q,
        country: params.country,
        page: params.page,
        page_size: params.page_size,
    };

    let response = match params.endpoint.as_deref() {
        None | Some("top-headlines") => client.top_headlines(&upstream).await?,
        Some("everything") => client.everything(&upstream).await?,
        Some(other) => {
            return Err(AppError::Validation(format!(
                "Unknown NewsAPI endpoint '{other}'"
            )))
        }
    };

    Ok(Json(NewsPage {
        status: "ok",
        total_results: response.total_results,
        current_page: params.page,
        total_pages: page_count(response.total_results, params.page_size),
        articles: response.articles.into_iter().map(Article::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GNewsProxyQuery {
    pub endpoint: Option<String>,
    pub q: Option<String>,
    pub lang: Option<String>,
    pub country: Option<String>,
    #[serde(default = "default_proxy_size")]
    pub max: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

/// GET /api/news/proxy/gnews
pub async fn proxy_gnews(
    State(state): State<AppState>,
    Query(params): Query<GNewsProxyQuery>,
) -> Result<Json<NewsPage>, AppError> {
    let client = state
        .gnews
        .as_ref()
        .ok_or(AppError::MissingApiKey("GNEWS_API_KEY"))?;

    let upstream = GNewsParams {
        query: params.q,
        lang: params.lang,
        country: params.country,
        max: params.max,
        page: params.page,
    };

    let response = match params.endpoint.as_deref() {
        None | Some("top-headlines") => client.top_headlines(&upstream).await?,
        Some("search") => client.search(&upstream).await?,
        Some(other) => {
            return Err(AppError::Validation(format!(
                "Unknown GNews endpoint '{other}'"
            )))
        }
    };

    Ok(Json(NewsPage {
        status: "ok",
        total_results: response.total_articles,
        current_page: params.page,
        total_pages: page_count(response.total_articles, params.max),
        articles: response.articles.into_iter().map(Article::from).collect(),
    }))
}

fn require_query(q: Option<&str>) -> Result<&str, AppError> {
    match q {
        Some(q) if !q.trim().is_empty() => Ok(q),
        _ => Err(AppError::Validation(
            "Search query 'q' is required".to_string(),
        )),
    }
}
