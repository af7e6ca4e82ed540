use serde::Serialize;
use strum::{Display, EnumString};
use time::OffsetDateTime;

use super::{AvatarPath, ChannelId};

/// Role of a chat author, stored in `youtube_profile.user_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Owner,
    Moderator,
    Member,
    Regular,
}

impl From<String> for UserType {
    fn from(user_type: String) -> Self {
        user_type.parse().unwrap_or(UserType::Regular)
    }
}

/// The author of a live chat message, as far as user persistence cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatAuthor {
    pub channel_id: ChannelId,
    pub display_name: String,
    pub is_owner: bool,
    pub is_moderator: bool,
    pub is_sponsor: bool,
    pub profile_image_url: Option<String>,
}

impl ChatAuthor {
    pub fn user_type(&self) -> UserType {
        if self.is_owner {
            UserType::Owner
        } else if self.is_moderator {
            UserType::Moderator
        } else if self.is_sponsor {
            UserType::Member
        } else {
            UserType::Regular
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub channel_id: ChannelId,
    pub display_name: String,
    pub user_type: UserType,
    pub avatar_path: Option<AvatarPath>,
    pub avatar_remote_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub channel_id: ChannelId,
    pub display_name: String,
    pub user_type: UserType,
}

impl From<&ChatAuthor> for NewUserProfile {
    fn from(author: &ChatAuthor) -> Self {
        Self {
            channel_id: author.channel_id.clone(),
            display_name: author.display_name.clone(),
            user_type: author.user_type(),
        }
    }
}

/// What happened to a profile while handling one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOutcome {
    pub profile: UserProfile,
    pub is_new: bool,
    pub identity_changed: bool,
    pub avatar: Option<AvatarPath>,
}
