use std::time::Duration;

use async_trait::async_trait;
use youtube::YoutubeClient;

use crate::{
    config::YoutubeSettings,
    domain::{models::ChannelId, ports::outbound::ChannelLookup, AcquireError},
};

/// Thumbnail lookup backed by the YouTube Data API.
pub struct YoutubeChannelLookup {
    client: YoutubeClient,
}

impl YoutubeChannelLookup {
    pub fn new(client: YoutubeClient) -> Self {
        Self { client }
    }

    /// Lookup whose API requests give up after `timeout`.
    pub fn from_settings(
        settings: &YoutubeSettings,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(YoutubeClient::with_http_client(
            http,
            settings.api_base_url.clone(),
            settings.api_key.clone(),
        )))
    }
}

#[async_trait]
impl ChannelLookup for YoutubeChannelLookup {
    async fn thumbnail_url(&self, channel_id: &ChannelId) -> Result<Option<String>, AcquireError> {
        // A channel without thumbnails is Ok(None); only request failures land here.
        self.client
            .fetch_channel_thumbnail_url(channel_id.as_str())
            .await
            .map_err(|err| {
                AcquireError::transport(format!("channel lookup for {channel_id}: {err}"))
            })
    }
}
