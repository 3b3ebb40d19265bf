//! Thumbnail generation collaborator
//!
//! The image service is asked to render a preview for a freshly created
//! resource. The request is fire-and-forget: it is spawned off the handler
//! task, its failure is logged by the caller side at `warn!`, and it never
//! blocks or fails the primary response.

use crate::config::ThumbnailerConfig;
use crate::errors::Result;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ThumbnailRequest {
    resource_id: i64,
    resource_url: String,
}

/// Client for the internal image-generation endpoint
#[derive(Clone)]
pub struct ThumbnailClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ThumbnailClient {
    pub fn new(config: &ThumbnailerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Request a thumbnail and wait for the outcome.
    ///
    /// A missing base URL disables the collaborator entirely; that is not
    /// an error.
    pub async fn request(&self, resource_id: i64, resource_url: &str) -> Result<()> {
        let Some(base_url) = &self.base_url else {
            debug!(resource_id, "Thumbnailer not configured, skipping");
            return Ok(());
        };

        self.client
            .post(format!("{}/thumbnails", base_url.trim_end_matches('/')))
            .json(&ThumbnailRequest {
                resource_id,
                resource_url: resource_url.to_string(),
            })
            .send()
            .await?
            .error_for_status()?;

        debug!(resource_id, "Thumbnail requested");
        Ok(())
    }

    /// Request a thumbnail without observing the outcome.
    ///
    /// Spawned on the runtime; failure is logged and swallowed so the
    /// primary response can never be delayed or broken by it.
    pub fn request_detached(&self, resource_id: i64, resource_url: String) {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(err) = client.request(resource_id, &resource_url).await {
                warn!(
                    resource_id,
                    error = %err,
                    "Thumbnail request failed"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_client_is_a_no_op() {
        let client = ThumbnailClient::new(&ThumbnailerConfig {
            base_url: None,
            timeout_secs: 1,
        });

        client.request(42, "https://example.com/post").await.unwrap();
    }

    #[tokio::test]
    async fn test_detached_request_never_surfaces_failure() {
        // Unreachable endpoint: the spawned task logs and swallows the error.
        let client = ThumbnailClient::new(&ThumbnailerConfig {
            base_url: Some("http://127.0.0.1:1".to_string()),
            timeout_secs: 1,
        });

        client.request_detached(42, "https://example.com/post".to_string());
        tokio::task::yield_now().await;
    }
}
