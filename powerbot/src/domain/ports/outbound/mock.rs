//! In-memory port implementations for tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;

use crate::domain::{
    models::{ChannelId, FetchedImage},
    AcquireError,
};

use super::{AvatarFetcher, ChannelLookup};

/// Lookup answering from a fixed table of channel id to thumbnail URL.
#[derive(Clone, Default)]
pub struct MockChannelLookup {
    thumbnails: Arc<HashMap<String, String>>,
    call_count: Arc<AtomicUsize>,
}

impl MockChannelLookup {
    pub fn with(channel_id: &str, url: &str) -> Self {
        Self {
            thumbnails: Arc::new(HashMap::from([(channel_id.to_string(), url.to_string())])),
            call_count: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelLookup for MockChannelLookup {
    async fn thumbnail_url(&self, channel_id: &ChannelId) -> Result<Option<String>, AcquireError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.thumbnails.get(channel_id.as_str()).cloned())
    }
}

/// Fetcher serving canned images by URL. Unknown URLs fail as a 404 would.
#[derive(Clone, Default)]
pub struct MockAvatarFetcher {
    images: Arc<Mutex<HashMap<String, FetchedImage>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockAvatarFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, bytes: &[u8], content_type: Option<&str>) {
        self.images.lock().unwrap().insert(
            url.to_string(),
            FetchedImage::new(bytes.to_vec(), content_type.map(str::to_owned)),
        );
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl AvatarFetcher for MockAvatarFetcher {
    async fn fetch(&self, url: &str, max_bytes: u64) -> Result<FetchedImage, AcquireError> {
        self.requested.lock().unwrap().push(url.to_string());
        let image = self
            .images
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AcquireError::transport(format!("404 Not Found for {url}")))?;

        if image.bytes.len() as u64 > max_bytes {
            return Err(AcquireError::SizeLimitExceeded { limit: max_bytes });
        }
        Ok(image)
    }
}
