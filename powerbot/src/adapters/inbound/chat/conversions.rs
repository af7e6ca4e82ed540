use youtube::LiveChatMessage;

use crate::domain::{
    models::{ChannelId, ChatAuthor},
    ChannelIdError,
};

impl TryFrom<LiveChatMessage> for ChatAuthor {
    type Error = ChannelIdError;

    fn try_from(message: LiveChatMessage) -> Result<Self, Self::Error> {
        let details = message.author_details;
        let channel_id = ChannelId::try_from(details.channel_id)?;
        let display_name = if details.display_name.trim().is_empty() {
            "Unknown".to_string()
        } else {
            details.display_name
        };

        Ok(ChatAuthor {
            channel_id,
            display_name,
            is_owner: details.is_chat_owner,
            is_moderator: details.is_chat_moderator,
            is_sponsor: details.is_chat_sponsor,
            profile_image_url: details.profile_image_url.filter(|url| !url.is_empty()),
        })
    }
}
