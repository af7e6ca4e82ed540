use serde::{Deserialize, Serialize};

/// Response body of `channels.list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<Channel>,
}

impl ChannelListResponse {
    pub fn into_first(self) -> Option<Channel> {
        self.items.into_iter().next()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub snippet: Option<ChannelSnippet>,
}

impl Channel {
    /// Smallest available thumbnail, which is what chat avatars are rendered at.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.snippet
            .as_ref()
            .and_then(|snippet| snippet.thumbnails.preferred())
            .map(|thumbnail| thumbnail.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    pub fn preferred(&self) -> Option<&Thumbnail> {
        [&self.default, &self.medium, &self.high]
            .into_iter()
            .flatten()
            .find(|thumbnail| !thumbnail.url.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
