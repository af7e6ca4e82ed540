use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header, Client};

use crate::domain::{models::FetchedImage, ports::outbound::AvatarFetcher, AcquireError};

/// Downloads avatars with a bounded, streamed read.
#[derive(Debug, Clone)]
pub struct HttpAvatarFetcher {
    client: Client,
}

impl HttpAvatarFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl From<reqwest::Error> for AcquireError {
    fn from(err: reqwest::Error) -> Self {
        AcquireError::Transport(err.to_string())
    }
}

#[async_trait]
impl AvatarFetcher for HttpAvatarFetcher {
    async fn fetch(&self, url: &str, max_bytes: u64) -> Result<FetchedImage, AcquireError> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        if let Some(length) = response.content_length() {
            if length > max_bytes {
                return Err(AcquireError::SizeLimitExceeded { limit: max_bytes });
            }
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if (bytes.len() + chunk.len()) as u64 > max_bytes {
                return Err(AcquireError::SizeLimitExceeded { limit: max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchedImage::new(bytes, content_type))
    }
}
