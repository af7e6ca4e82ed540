use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::domain::{
    models::{AvatarFormat, AvatarPath, ChannelId},
    ports::outbound::AvatarStore,
    AcquireError,
};

/// Stores avatars as `{media_root}/{avatar_dir}/{channel_id}{ext}`.
#[derive(Debug, Clone)]
pub struct FilesystemAvatarStore {
    media_root: PathBuf,
    avatar_dir: String,
}

impl FilesystemAvatarStore {
    pub fn new(media_root: impl AsRef<Path>, avatar_dir: impl Into<String>) -> Self {
        Self {
            media_root: media_root.as_ref().to_path_buf(),
            avatar_dir: avatar_dir.into(),
        }
    }

    pub fn directory(&self) -> PathBuf {
        self.media_root.join(self.avatar_dir.trim_matches('/'))
    }

    /// Create the avatar directory ahead of the first download.
    pub async fn initialize(&self) -> std::io::Result<()> {
        let directory = self.directory();
        fs::create_dir_all(&directory).await?;
        info!("Avatar directory initialized: {}", directory.display());
        Ok(())
    }

    fn file_name(channel_id: &ChannelId, format: AvatarFormat) -> String {
        format!("{}{}", channel_id, format.extension())
    }

    async fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await
    }

    async fn remove_stale(&self, channel_id: &ChannelId, current: AvatarFormat) {
        for format in AvatarFormat::ALL.into_iter().filter(|f| *f != current) {
            let stale = self.directory().join(Self::file_name(channel_id, format));
            match fs::remove_file(&stale).await {
                Ok(()) => debug!("Removed stale avatar {}", stale.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove stale avatar {}: {}", stale.display(), e),
            }
        }
    }
}

#[async_trait]
impl AvatarStore for FilesystemAvatarStore {
    async fn write(
        &self,
        channel_id: &ChannelId,
        format: AvatarFormat,
        bytes: &[u8],
    ) -> Result<AvatarPath, AcquireError> {
        let directory = self.directory();
        fs::create_dir_all(&directory).await?;

        let file_name = Self::file_name(channel_id, format);
        let partial = directory.join(format!("{file_name}.part"));
        // The current file is only replaced once the new one is complete.
        if let Err(e) = Self::write_file(&partial, bytes).await {
            if let Err(cleanup) = fs::remove_file(&partial).await {
                debug!("Could not remove {}: {}", partial.display(), cleanup);
            }
            return Err(e.into());
        }
        fs::rename(&partial, directory.join(&file_name)).await?;

        self.remove_stale(channel_id, format).await;

        Ok(AvatarPath::new(&self.avatar_dir, &file_name))
    }

    async fn find(&self, channel_id: &ChannelId) -> Option<AvatarPath> {
        for format in AvatarFormat::ALL {
            let file_name = Self::file_name(channel_id, format);
            if fs::try_exists(self.directory().join(&file_name))
                .await
                .unwrap_or(false)
            {
                return Some(AvatarPath::new(&self.avatar_dir, &file_name));
            }
        }
        None
    }
}
