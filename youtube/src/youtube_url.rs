use url::form_urlencoded;

/// Request URL against the YouTube Data API, built up path and query piece by piece.
#[derive(Debug, Clone)]
pub struct YoutubeURL(String);

impl AsRef<str> for YoutubeURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl YoutubeURL {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self(base_url.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append a query parameter, percent-encoding the value.
    pub fn with_query(&self, key: &str, value: &str) -> Self {
        let encoded: String = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish();

        if self.0.contains('?') {
            Self(format!("{}&{}", self.0, encoded))
        } else {
            Self(format!("{}?{}", self.0, encoded))
        }
    }
}
