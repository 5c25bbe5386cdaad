//! Article enrichment: fetch each article's own page and scrape an image,
//! body text, description and keywords out of it.
//!
//! Enrichment is best-effort. A page that cannot be fetched or parsed
//! degrades to a stub article; it never fails the surrounding request.

use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use tracing::warn;

use crate::keywords::extract_keywords;
use crate::models::article::Article;
use crate::news::html;
use crate::news::text::{clean_article_text, truncate_chars, DESCRIPTION_MAX_CHARS};
use crate::sources::guardian::GuardianItem;

/// Article pages are fetched in groups of this size, each group awaited
/// before the next starts.
pub const ENRICH_BATCH_SIZE: usize = 10;

const PAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ArticleEnricher {
    client: Client,
}

impl Default for ArticleEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleEnricher {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(PAGE_FETCH_TIMEOUT)
                .user_agent(concat!("newsjournal/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Enriches a batch of Guardian results, [`ENRICH_BATCH_SIZE`] pages at a
    /// time. Output order matches input order.
    pub async fn enrich_all(&self, items: &[GuardianItem]) -> Vec<Article> {
        let mut articles = Vec::with_capacity(items.len());
        for chunk in items.chunks(ENRICH_BATCH_SIZE) {
            let batch = join_all(chunk.iter().map(|item| self.enrich(item))).await;
            articles.extend(batch);
        }
        articles
    }

    pub async fn enrich(&self, item: &GuardianItem) -> Article {
        match self.try_enrich(item).await {
            Ok(article) => article,
            Err(e) => {
                warn!("Failed to enrich article {}: {e}", item.web_url);
                stub_article(item)
            }
        }
    }

    async fn try_enrich(&self, item: &GuardianItem) -> anyhow::Result<Article> {
        let page = self
            .client
            .get(&item.web_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let image_url = html::first_img_src(&page);
        let body_text = html::extract_body_text(&page);
        let cleaned = clean_article_text(&body_text);
        let description = truncate_chars(&cleaned, DESCRIPTION_MAX_CHARS);
        let keywords = extract_keywords(&format!("{} {}", item.web_title, body_text));

        Ok(Article {
            title: item.web_title.clone(),
            description,
            url: item.web_url.clone(),
            image_url,
            source: section_or(item, "unknown"),
            published_at: item.web_publication_date,
            author: None,
            keywords,
            categories: vec![section_or(item, "other")],
        })
    }
}

/// Fallback article when the page fetch fails.
fn stub_article(item: &GuardianItem) -> Article {
    Article {
        title: item.web_title.clone(),
        description: String::new(),
        url: item.web_url.clone(),
        image_url: None,
        source: section_or(item, "unknown"),
        published_at: item.web_publication_date,
        author: None,
        keywords: vec![],
        categories: vec![section_or(item, "other")],
    }
}

fn section_or(item: &GuardianItem, fallback: &str) -> String {
    item.section_id
        .clone()
        .unwrap_or_else(|| fallback.to_string())
}
