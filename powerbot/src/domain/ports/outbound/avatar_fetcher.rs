use async_trait::async_trait;

use crate::domain::{models::FetchedImage, AcquireError};

#[async_trait]
pub trait AvatarFetcher: Send + Sync + 'static {
    /// Download `url`, failing with `SizeLimitExceeded` once more than
    /// `max_bytes` would be read.
    async fn fetch(&self, url: &str, max_bytes: u64) -> Result<FetchedImage, AcquireError>;
}
