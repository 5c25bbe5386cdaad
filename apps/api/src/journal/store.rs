//! Journal persistence queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::article::JournalEntryRow;

/// Insert payload for a new journal entry.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
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
}

pub async fn user_exists(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

pub async fn find_by_user_and_url(
    pool: &PgPool,
    user_id: Uuid,
    url: &str,
) -> Result<Option<JournalEntryRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM journal_entries WHERE user_id = $1 AND url = $2")
        .bind(user_id)
        .bind(url)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &PgPool, entry: &NewJournalEntry) -> Result<JournalEntryRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO journal_entries
            (user_id, url, source, title, description, content, image_url,
             published_at, author, keywords, categories)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(entry.user_id)
    .bind(&entry.url)
    .bind(&entry.source)
    .bind(&entry.title)
    .bind(&entry.description)
    .bind(&entry.content)
    .bind(&entry.image_url)
    .bind(entry.published_at)
    .bind(&entry.author)
    .bind(&entry.keywords)
    .bind(&entry.categories)
    .fetch_one(pool)
    .await
}

/// Journal listing, newest article first.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<JournalEntryRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM journal_entries WHERE user_id = $1 ORDER BY published_at DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(
    pool: &PgPool,
    entry_id: Uuid,
) -> Result<Option<JournalEntryRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM journal_entries WHERE id = $1")
        .bind(entry_id)
        .fetch_optional(pool)
        .await
}

pub async fn delete(pool: &PgPool, entry_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1")
        .bind(entry_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
