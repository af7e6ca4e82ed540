use serde::{Deserialize, Serialize};

/// A `liveChatMessage` resource as returned in `liveChatMessages.list` items.
///
/// Every field is optional on the wire; missing values fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveChatMessage {
    pub id: String,
    pub snippet: LiveChatSnippet,
    pub author_details: AuthorDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveChatSnippet {
    pub published_at: String,
    pub text_message_details: Option<TextMessageDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TextMessageDetails {
    pub message_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorDetails {
    pub channel_id: String,
    pub display_name: String,
    pub profile_image_url: Option<String>,
    pub is_chat_owner: bool,
    pub is_chat_moderator: bool,
    pub is_chat_sponsor: bool,
}
