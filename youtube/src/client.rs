use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{domain::ChannelListResponse, YoutubeURL};

/// Read-only client for the YouTube Data API v3, authenticated with an API key.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: YoutubeURL,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: YoutubeURL::new(base_url),
            api_key: api_key.into(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &YoutubeURL) -> Result<T, YoutubeFetchError> {
        let resp = self
            .http
            .get(url.as_ref())
            .send()
            .await
            .map_err(|e| YoutubeFetchError::ResponseError(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(YoutubeFetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(YoutubeFetchError::Status(status.as_u16()));
        }

        resp.json::<T>().await.map_err(|e| {
            YoutubeFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// Look up the thumbnail URL of a channel via `channels.list`.
    ///
    /// Returns `Ok(None)` when the channel does not exist or has no thumbnails.
    pub async fn fetch_channel_thumbnail_url(
        &self,
        channel_id: &str,
    ) -> Result<Option<String>, YoutubeFetchError> {
        let url = self
            .base_url
            .append_path("/channels")
            .with_query("part", "snippet")
            .with_query("id", channel_id)
            .with_query("fields", "items(id,snippet(thumbnails))")
            .with_query("key", &self.api_key);

        let response: ChannelListResponse = self.fetch(&url).await?;
        let thumbnail = response
            .into_first()
            .and_then(|channel| channel.thumbnail_url().map(str::to_owned));

        debug!(
            channel_id,
            found = thumbnail.is_some(),
            "channel thumbnail lookup"
        );

        Ok(thumbnail)
    }
}

#[derive(Error, Debug)]
pub enum YoutubeFetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
}
