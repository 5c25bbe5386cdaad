use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::journal::store::{self, NewJournalEntry};
use crate::models::article::JournalEntryRow;
use crate::state::AppState;

fn default_source() -> String {
    "unknown".to_string()
}

fn default_title() -> String {
    "Untitled".to_string()
}

fn default_description() -> String {
    "No description".to_string()
}

fn default_categories() -> Vec<String> {
    vec!["general".to_string()]
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveArticleRequest {
    /// Kept as a string so a malformed ID is a validation error, not a
    /// body-rejection.
    pub user_id: Option<String>,
    pub url: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SavedEntryResponse {
    pub message: String,
    pub entry: JournalEntryRow,
}

/// POST /api/news/journal
pub async fn add_to_journal(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<SaveArticleRequest>,
) -> Result<(StatusCode, Json<SavedEntryResponse>), AppError> {
    let user_id = req
        .user_id
        .as_deref()
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;
    let user_id = Uuid::parse_str(user_id)
        .map_err(|_| AppError::Validation("Invalid user ID".to_string()))?;

    let url = match req.url.as_deref() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => return Err(AppError::Validation("URL is required".to_string())),
    };

    if !store::user_exists(&state.db, user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    if store::find_by_user_and_url(&state.db, user_id, &url)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Article already in journal".to_string()));
    }

    // an empty content field falls back to the description copy
    let content = if req.content.is_empty() {
        req.description.clone()
    } else {
        req.content
    };

    let entry = store::insert(
        &state.db,
        &NewJournalEntry {
            user_id,
            url,
            source: req.source,
            title: req.title,
            description: req.description,
            content,
            image_url: req.image_url,
            published_at: req.published_at.unwrap_or_else(Utc::now),
            author: req.author,
            keywords: req.keywords,
            categories: req.categories,
        },
    )
    .await?;

    state.caches.invalidate_user(user_id).await;

    Ok((
        StatusCode::CREATED,
        Json(SavedEntryResponse {
            message: "Article added to journal".to_string(),
            entry,
        }),
    ))
}

/// GET /api/news/:user_id/journal
pub async fn get_user_journal(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<JournalEntryRow>>, AppError> {
    let entries = store::list_for_user(&state.db, user_id).await?;
    Ok(Json(entries))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedEntryResponse {
    pub success: bool,
    pub message: String,
    pub deleted_entry: Uuid,
}

/// DELETE /api/news/journal/:entry_id
pub async fn delete_from_journal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<DeletedEntryResponse>, AppError> {
    let entry = store::find_by_id(&state.db, entry_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;

    store::delete(&state.db, entry_id).await?;
    tracing::info!("User {} removed journal entry {entry_id}", auth.0);
    state.caches.invalidate_user(entry.user_id).await;

    Ok(Json(DeletedEntryResponse {
        success: true,
        message: "Entry deleted successfully".to_string(),
        deleted_entry: entry_id,
    }))
}
