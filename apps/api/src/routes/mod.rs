pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::journal::handlers as journal;
use crate::news::handlers as news;
use crate::recommend::handlers as recommend;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Provider feed and search
        .route("/api/news/all", get(news::get_all_news))
        .route("/api/news/search", get(news::search_news))
        .route("/api/news/strict-search", get(news::strict_search))
        .route("/api/news/proxy/newsapi", get(news::proxy_newsapi))
        .route("/api/news/proxy/gnews", get(news::proxy_gnews))
        // Journal (auth required)
        .route("/api/news/journal", post(journal::add_to_journal))
        .route(
            "/api/news/journal/:entry_id",
            delete(journal::delete_from_journal),
        )
        .route("/api/news/:user_id/journal", get(journal::get_user_journal))
        // Recommendations (auth required)
        .route(
            "/api/news/recommendations/:user_id",
            get(recommend::get_recommendations),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::auth::TokenVerifier;
    use crate::errors::AppError;
    use crate::news::enrich::ArticleEnricher;
    use crate::sources::{GNewsClient, GuardianClient, NewsApiClient};
    use crate::state::{AppState, Caches};

    struct StaticVerifier {
        token: &'static str,
        user_id: Uuid,
    }

    #[async_trait]
    impl TokenVerifier for StaticVerifier {
        async fn verify(&self, token: &str) -> Result<Option<Uuid>, AppError> {
            Ok((token == self.token).then_some(self.user_id))
        }
    }

    /// State backed by a lazy (never-connected) pool, suitable for routes
    /// that stop before touching the database.
    fn test_state(
        guardian_url: &str,
        newsapi_url: Option<&str>,
        gnews_url: Option<&str>,
    ) -> AppState {
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/newsjournal_test")
            .expect("valid database URL");

        AppState {
            db,
            guardian: GuardianClient::with_base_url("test-key".to_string(), guardian_url),
            gnews: gnews_url.map(|u| GNewsClient::with_base_url("test-key".to_string(), u)),
            newsapi: newsapi_url.map(|u| NewsApiClient::with_base_url("test-key".to_string(), u)),
            enricher: ArticleEnricher::new(),
            caches: Arc::new(Caches::new()),
            token_verifier: Arc::new(StaticVerifier {
                token: "valid-token",
                user_id: Uuid::new_v4(),
            }),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state("http://unused.invalid", None, None));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "newsjournal-api");
    }

    #[tokio::test]
    async fn test_all_news_returns_paged_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": { "total": 20, "results": [] }
            })))
            .mount(&server)
            .await;

        let app = build_router(test_state(&server.uri(), None, None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/news/all?page=2&maxPerPage=9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["totalResults"], 20);
        assert_eq!(body["currentPage"], 2);
        assert_eq!(body["totalPages"], 3);
        assert!(body["articles"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_without_query_is_400() {
        let app = build_router(test_state("http://unused.invalid", None, None));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/news/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_newsapi_proxy_normalizes_articles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [{
                    "source": { "id": null, "name": "Example Wire" },
                    "author": "A. Reporter",
                    "title": "Big story",
                    "description": "Something happened",
                    "url": "https://example.com/big",
                    "urlToImage": "https://example.com/big.jpg",
                    "publishedAt": "2024-04-01T12:00:00Z",
                    "content": "Something happened..."
                }]
            })))
            .mount(&server)
            .await;

        let uri = server.uri();
        let app = build_router(test_state("http://unused.invalid", Some(uri.as_str()), None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/news/proxy/newsapi?endpoint=top-headlines&country=us")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["totalResults"], 1);
        let article = &body["articles"][0];
        assert_eq!(article["title"], "Big story");
        assert_eq!(article["source"], "Example Wire");
        assert_eq!(article["imageUrl"], "https://example.com/big.jpg");
    }

    #[tokio::test]
    async fn test_newsapi_proxy_unknown_endpoint_is_400() {
        let app = build_router(test_state(
            "http://unused.invalid",
            Some("http://unused.invalid"),
            None,
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/news/proxy/newsapi?endpoint=sources")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_gnews_proxy_without_key_is_config_error() {
        let app = build_router(test_state("http://unused.invalid", None, None));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/news/proxy/gnews")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_journal_post_without_token_is_401() {
        let app = build_router(test_state("http://unused.invalid", None, None));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/news/journal")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_journal_post_with_unknown_token_is_401() {
        let app = build_router(test_state("http://unused.invalid", None, None));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/news/journal")
                    .header("content-type", "application/json")
                    .header("authorization", "Bearer wrong-token")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_journal_post_rejects_missing_user_id_before_db() {
        // With a valid token but no userId, validation fires before any
        // database access, so the lazy pool is never touched.
        let app = build_router(test_state("http://unused.invalid", None, None));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/news/journal")
                    .header("content-type", "application/json")
                    .header("authorization", "Bearer valid-token")
                    .body(Body::from(r#"{"url": "https://example.com/a"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_journal_delete_invalid_uuid_is_client_error() {
        let app = build_router(test_state("http://unused.invalid", None, None));

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/news/journal/not-a-uuid")
                    .header("authorization", "Bearer valid-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
