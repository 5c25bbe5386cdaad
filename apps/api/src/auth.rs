//! Bearer-token verification.
//!
//! Token issuance (registration, login) belongs to the external auth
//! service; this API only resolves presented tokens to user IDs. The
//! verifier is a trait object in `AppState` so deployments and tests can
//! swap the backing store without touching handlers.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolves a bearer token to a user ID; `None` when the token is
    /// unknown.
    async fn verify(&self, token: &str) -> Result<Option<Uuid>, AppError>;
}

/// Default verifier: looks tokens up in the `api_tokens` table.
pub struct DbTokenVerifier {
    pool: PgPool,
}

impl DbTokenVerifier {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenVerifier for DbTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Option<Uuid>, AppError> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT user_id FROM api_tokens WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(user_id,)| user_id))
    }
}

/// The authenticated caller, resolved from the `Authorization` header.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized);
        }

        match state.token_verifier.verify(token).await? {
            Some(user_id) => Ok(AuthUser(user_id)),
            None => Err(AppError::Unauthorized),
        }
    }
}
