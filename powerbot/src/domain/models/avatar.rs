use std::fmt;

use mime::Mime;
use serde::Serialize;

/// Image formats an avatar may be stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl AvatarFormat {
    pub const ALL: [AvatarFormat; 4] = [Self::Jpeg, Self::Png, Self::Gif, Self::Webp];

    /// Maps a `Content-Type` header value to a format.
    ///
    /// Parameters such as `; charset=binary` are ignored. Returns `None` for
    /// anything outside the accepted image types.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime: Mime = content_type.trim().parse().ok()?;
        if !mime.type_().as_str().eq_ignore_ascii_case("image") {
            return None;
        }

        match mime.subtype().as_str().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" | "pjpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// File extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::Gif => ".gif",
            Self::Webp => ".webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

impl fmt::Display for AvatarFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime_type())
    }
}

/// Path of a cached avatar relative to the media root, always `/`-separated.
///
/// This is the value stored in `youtube_profile.channel_avatar_url`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AvatarPath(String);

impl AvatarPath {
    pub fn new(avatar_dir: &str, file_name: &str) -> Self {
        let dir = avatar_dir.trim_matches('/');
        if dir.is_empty() {
            Self(file_name.to_string())
        } else {
            Self(format!("{dir}/{file_name}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvatarPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AvatarPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl AsRef<str> for AvatarPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Raw body of an avatar download together with its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedImage {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }
}

/// Result of a successful acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredAvatar {
    pub path: AvatarPath,
    pub remote_url: String,
    pub format: AvatarFormat,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_accepted_content_types() {
        assert_eq!(
            AvatarFormat::from_content_type("image/jpeg"),
            Some(AvatarFormat::Jpeg)
        );
        assert_eq!(
            AvatarFormat::from_content_type("image/jpg"),
            Some(AvatarFormat::Jpeg)
        );
        assert_eq!(
            AvatarFormat::from_content_type("IMAGE/PNG"),
            Some(AvatarFormat::Png)
        );
        assert_eq!(
            AvatarFormat::from_content_type("image/webp; charset=binary"),
            Some(AvatarFormat::Webp)
        );
        assert_eq!(
            AvatarFormat::from_content_type(" image/gif "),
            Some(AvatarFormat::Gif)
        );
    }

    #[test]
    fn rejects_other_content_types() {
        assert_eq!(AvatarFormat::from_content_type("image/svg+xml"), None);
        assert_eq!(AvatarFormat::from_content_type("text/html"), None);
        assert_eq!(AvatarFormat::from_content_type(""), None);
        assert_eq!(AvatarFormat::from_content_type("not a mime"), None);
    }

    #[test]
    fn avatar_path_joins_with_forward_slash() {
        assert_eq!(
            AvatarPath::new("media/yt_avatars/", "UC1.jpg").as_str(),
            "media/yt_avatars/UC1.jpg"
        );
        assert_eq!(AvatarPath::new("", "UC1.png").as_str(), "UC1.png");
    }
}
