use async_trait::async_trait;

use crate::domain::{models::ChannelId, AcquireError};

/// Resolves a channel's current thumbnail URL at the identity provider.
#[async_trait]
pub trait ChannelLookup: Send + Sync + 'static {
    async fn thumbnail_url(&self, channel_id: &ChannelId) -> Result<Option<String>, AcquireError>;
}
