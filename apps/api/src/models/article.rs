#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Normalized wire-format article. Every provider's payload is mapped into
/// this shape before it leaves the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A saved journal entry: a denormalized copy of an external article,
/// unique per (user, url).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub url: String,
    pub source: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image_url: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
    pub keywords: Vec<String>,
    pub categories: Vec<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
