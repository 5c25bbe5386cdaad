//! Outbound news-provider clients.
//!
//! ARCHITECTURAL RULE: no other module talks to a news provider directly.
//! Every Guardian/GNews/NewsAPI call goes through a client in this module.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub mod gnews;
pub mod guardian;
pub mod newsapi;

pub use gnews::GNewsClient;
pub use guardian::GuardianClient;
pub use newsapi::NewsApiClient;

const MAX_RETRIES: u32 = 3;
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

/// Shared HTTP client for provider calls.
pub(crate) fn provider_client() -> Client {
    Client::builder()
        .timeout(PROVIDER_TIMEOUT)
        .user_agent(concat!("newsjournal/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
}

/// Sends a GET request built by `build` and decodes the JSON body.
/// Retries on 429 (rate limit), 5xx and transport errors with exponential
/// backoff: 1s, 2s, 4s. Other non-success statuses fail immediately.
pub(crate) async fn get_json<T, F>(build: F) -> Result<T, SourceError>
where
    T: DeserializeOwned,
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error: Option<SourceError> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
            warn!(
                "Provider call attempt {} failed, retrying after {}ms...",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        let response = match build().send().await {
            Ok(r) => r,
            Err(e) => {
                last_error = Some(SourceError::Http(e));
                continue;
            }
        };

        let status = response.status();

        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("Provider returned {}: {}", status, body);
            last_error = Some(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
            continue;
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        return Ok(response.json::<T>().await?);
    }

    Err(last_error.unwrap_or(SourceError::RateLimited {
        retries: MAX_RETRIES,
    }))
}
