use axum::extract::{Path, Query, State};
use axum::Json;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::journal::store;
use crate::models::article::Article;
use crate::news::handlers::default_page;
use crate::news::page_count;
use crate::recommend::interests::analyze_interests;
use crate::recommend::{profile_key, recommendations_key};
use crate::sources::guardian::GuardianSearchParams;
use crate::state::AppState;

/// Query used when a journal yields no usable keywords.
pub const FALLBACK_QUERY: &str = "technology business science sports";

/// How many profile keywords feed the provider query.
const MAX_QUERY_KEYWORDS: usize = 5;

fn default_size() -> u32 {
    6
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub max_per_page: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsPage {
    pub status: &'static str,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_results: u64,
    pub recommendations: Vec<Article>,
}

/// GET /api/news/recommendations/:user_id
pub async fn get_recommendations(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Query(params): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsPage>, AppError> {
    let entries = store::list_for_user(&state.db, user_id).await?;
    if entries.is_empty() {
        return Ok(Json(RecommendationsPage {
            status: "ok",
            current_page: params.page,
            total_pages: 0,
            total_results: 0,
            recommendations: vec![],
        }));
    }

    let cache_key = recommendations_key(user_id, params.page, params.max_per_page);
    if let Some(page) = state.caches.recommendations.get(&cache_key).await {
        debug!("Recommendation cache hit: {cache_key}");
        return Ok(Json(page));
    }

    let profile = match state.caches.profiles.get(&profile_key(user_id)).await {
        Some(profile) => profile,
        None => {
            let profile = analyze_interests(&entries);
            state
                .caches
                .profiles
                .insert(profile_key(user_id), profile.clone())
                .await;
            profile
        }
    };

    let query = build_search_query(&profile);
    debug!("Recommendation query for {user_id}: {query}");

    let body = state
        .guardian
        .search(&GuardianSearchParams {
            query: Some(query),
            section: None,
            from_date: None,
            to_date: None,
            page: params.page,
            page_size: params.max_per_page,
        })
        .await?;

    let mut articles = state.enricher.enrich_all(&body.results).await;
    articles.shuffle(&mut rand::thread_rng());

    let page = RecommendationsPage {
        status: "ok",
        current_page: params.page,
        total_pages: page_count(body.total, params.max_per_page),
        total_results: body.total,
        recommendations: articles,
    };
    state
        .caches
        .recommendations
        .insert(cache_key, page.clone())
        .await;

    Ok(Json(page))
}

/// Joins the top profile keywords into a provider OR-query.
fn build_search_query(profile: &[String]) -> String {
    if profile.is_empty() {
        return FALLBACK_QUERY.to_string();
    }
    profile
        .iter()
        .take(MAX_QUERY_KEYWORDS)
        .cloned()
        .collect::<Vec<_>>()
        .join(" OR ")
}
