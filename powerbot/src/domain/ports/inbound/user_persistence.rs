use async_trait::async_trait;

use crate::domain::{
    models::{AvatarPath, ChannelId, ChatAuthor, ProfileOutcome, UserProfile},
    ProfileError,
};

#[async_trait]
pub trait UserPersistence: Send + Sync + 'static {
    async fn handle_message(&self, author: ChatAuthor) -> Result<ProfileOutcome, ProfileError>;

    async fn refresh_avatar(
        &self,
        channel_id: &ChannelId,
        remote_url: Option<&str>,
    ) -> Result<Option<AvatarPath>, ProfileError>;

    async fn profile(&self, channel_id: &ChannelId) -> Result<Option<UserProfile>, ProfileError>;
}
