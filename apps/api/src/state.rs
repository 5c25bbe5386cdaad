use std::sync::Arc;

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::auth::TokenVerifier;
use crate::cache::{TtlCache, DEFAULT_TTL};
use crate::news::enrich::ArticleEnricher;
use crate::recommend::handlers::RecommendationsPage;
use crate::recommend::{profile_key, user_prefix};
use crate::sources::{GNewsClient, GuardianClient, NewsApiClient};

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub guardian: GuardianClient,
    /// `None` when GNEWS_API_KEY is unset; the proxy endpoint then fails
    /// with a config error.
    pub gnews: Option<GNewsClient>,
    /// `None` when NEWSAPI_API_KEY is unset.
    pub newsapi: Option<NewsApiClient>,
    pub enricher: ArticleEnricher,
    pub caches: Arc<Caches>,
    /// Pluggable bearer-token verifier. Default: `DbTokenVerifier`.
    pub token_verifier: Arc<dyn TokenVerifier>,
}

/// The per-process caches. Both are keyed by composite strings carrying the
/// user ID so journal mutations can drop a user's entries by prefix.
pub struct Caches {
    pub profiles: TtlCache<Vec<String>>,
    pub recommendations: TtlCache<RecommendationsPage>,
}

impl Caches {
    pub fn new() -> Self {
        Self {
            profiles: TtlCache::new(DEFAULT_TTL),
            recommendations: TtlCache::new(DEFAULT_TTL),
        }
    }

    /// Drops every cached profile and recommendation page for a user.
    /// Called on journal add/remove.
    pub async fn invalidate_user(&self, user_id: Uuid) {
        let profiles = self.profiles.invalidate_prefix(&profile_key(user_id)).await;
        let pages = self
            .recommendations
            .invalidate_prefix(&user_prefix(user_id))
            .await;
        if profiles + pages > 0 {
            debug!("Dropped {} cached entries for user {user_id}", profiles + pages);
        }
    }
}

impl Default for Caches {
    fn default() -> Self {
        Self::new()
    }
}
