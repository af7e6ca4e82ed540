use async_trait::async_trait;

use crate::domain::{
    models::{AcquiredAvatar, AvatarPath, ChannelId},
    AcquireError,
};

#[async_trait]
pub trait AvatarService: Send + Sync + 'static {
    /// Download the channel's avatar and store it as the channel's single cached file.
    ///
    /// Without a `remote_url` the thumbnail is looked up at the identity provider first.
    async fn acquire(
        &self,
        channel_id: &ChannelId,
        remote_url: Option<&str>,
    ) -> Result<AcquiredAvatar, AcquireError>;

    async fn local_path(&self, channel_id: &ChannelId) -> Option<AvatarPath>;
}
