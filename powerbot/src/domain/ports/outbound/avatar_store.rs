use async_trait::async_trait;

use crate::domain::{
    models::{AvatarFormat, AvatarPath, ChannelId},
    AcquireError,
};

/// Durable storage for cached avatar files, one current file per channel.
#[async_trait]
pub trait AvatarStore: Send + Sync + 'static {
    async fn write(
        &self,
        channel_id: &ChannelId,
        format: AvatarFormat,
        bytes: &[u8],
    ) -> Result<AvatarPath, AcquireError>;

    async fn find(&self, channel_id: &ChannelId) -> Option<AvatarPath>;
}
