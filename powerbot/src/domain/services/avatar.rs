use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::{
    domain::{
        models::{AcquiredAvatar, AvatarFormat, AvatarPath, ChannelId},
        ports::{
            inbound::AvatarService,
            outbound::{AvatarFetcher, AvatarStore, ChannelLookup},
        },
        AcquireError,
    },
    utils::KeyedMutex,
};

pub const MAX_AVATAR_SIZE: u64 = 10 * 1024 * 1024;

pub struct AvatarServiceImpl<L, F, S> {
    lookup: Arc<L>,
    fetcher: Arc<F>,
    store: Arc<S>,
    max_image_bytes: u64,
    locks: KeyedMutex,
}

impl<L, F, S> AvatarServiceImpl<L, F, S> {
    pub fn new(lookup: Arc<L>, fetcher: Arc<F>, store: Arc<S>) -> Self {
        Self {
            lookup,
            fetcher,
            store,
            max_image_bytes: MAX_AVATAR_SIZE,
            locks: KeyedMutex::new(),
        }
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: u64) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }
}

#[async_trait]
impl<L, F, S> AvatarService for AvatarServiceImpl<L, F, S>
where
    L: ChannelLookup,
    F: AvatarFetcher,
    S: AvatarStore,
{
    #[instrument(skip(self), fields(channel_id = %channel_id))]
    async fn acquire(
        &self,
        channel_id: &ChannelId,
        remote_url: Option<&str>,
    ) -> Result<AcquiredAvatar, AcquireError> {
        let _guard = self.locks.lock(channel_id.as_str()).await;

        let remote_url = match remote_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => url.to_string(),
            None => self
                .lookup
                .thumbnail_url(channel_id)
                .await?
                .ok_or_else(|| AcquireError::LookupFailed(channel_id.to_string()))?,
        };

        let image = self.fetcher.fetch(&remote_url, self.max_image_bytes).await?;
        let size = image.bytes.len() as u64;
        if size > self.max_image_bytes {
            return Err(AcquireError::SizeLimitExceeded {
                limit: self.max_image_bytes,
            });
        }

        let format = match image
            .content_type
            .as_deref()
            .and_then(AvatarFormat::from_content_type)
        {
            Some(format) => format,
            None => {
                warn!(
                    content_type = image.content_type.as_deref().unwrap_or("<none>"),
                    "Unknown avatar content type, using .jpg"
                );
                AvatarFormat::Jpeg
            }
        };

        let path = self.store.write(channel_id, format, &image.bytes).await?;
        info!("Avatar downloaded: {} ({}, {} bytes)", path, format, size);

        Ok(AcquiredAvatar {
            path,
            remote_url,
            format,
            size,
        })
    }

    async fn local_path(&self, channel_id: &ChannelId) -> Option<AvatarPath> {
        self.store.find(channel_id).await
    }
}
