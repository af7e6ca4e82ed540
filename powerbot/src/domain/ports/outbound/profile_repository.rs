use async_trait::async_trait;

use crate::domain::{
    models::{AvatarPath, ChannelId, NewUserProfile, UserProfile, UserType},
    ProfileError,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    async fn find_by_channel_id(
        &self,
        channel_id: &ChannelId,
    ) -> Result<Option<UserProfile>, ProfileError>;

    async fn insert(&self, profile: &NewUserProfile) -> Result<UserProfile, ProfileError>;

    async fn update_identity(
        &self,
        channel_id: &ChannelId,
        display_name: &str,
        user_type: UserType,
    ) -> Result<UserProfile, ProfileError>;

    async fn set_avatar(
        &self,
        channel_id: &ChannelId,
        path: &AvatarPath,
        remote_url: &str,
    ) -> Result<(), ProfileError>;
}
