use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    models::{AvatarPath, ChannelId, ChatAuthor, NewUserProfile, ProfileOutcome, UserProfile},
    ports::{
        inbound::{AvatarService, UserPersistence},
        outbound::ProfileRepository,
    },
    AcquireError, ProfileError,
};

/// Creates or updates a `youtube_profile` row per chat author and keeps the
/// cached avatar in step with it.
///
/// An avatar is acquired when the author is new, their name or role changed,
/// no avatar is recorded yet, or the message carries a profile image URL other
/// than the one the current file was downloaded from. Acquisition failures are logged and never fail
/// the profile write.
pub struct UserPersistenceHandler<R, A> {
    repository: Arc<R>,
    avatars: Arc<A>,
}

impl<R, A> UserPersistenceHandler<R, A> {
    pub fn new(repository: Arc<R>, avatars: Arc<A>) -> Self {
        Self {
            repository,
            avatars,
        }
    }
}

impl<R: ProfileRepository, A: AvatarService> UserPersistenceHandler<R, A> {
    async fn try_acquire(
        &self,
        channel_id: &ChannelId,
        remote_url: Option<&str>,
    ) -> Result<Option<(AvatarPath, String)>, ProfileError> {
        match self.avatars.acquire(channel_id, remote_url).await {
            Ok(acquired) => {
                self.repository
                    .set_avatar(channel_id, &acquired.path, &acquired.remote_url)
                    .await?;
                Ok(Some((acquired.path, acquired.remote_url)))
            }
            Err(AcquireError::LookupFailed(reason)) => {
                debug!("No avatar URL for {}: {}", channel_id, reason);
                Ok(None)
            }
            Err(e) => {
                warn!("Failed to acquire avatar for {}: {}", channel_id, e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<R: ProfileRepository, A: AvatarService> UserPersistence for UserPersistenceHandler<R, A> {
    #[instrument(skip(self, author), fields(channel_id = %author.channel_id))]
    async fn handle_message(&self, author: ChatAuthor) -> Result<ProfileOutcome, ProfileError> {
        let user_type = author.user_type();

        let (mut profile, is_new, identity_changed) =
            match self.repository.find_by_channel_id(&author.channel_id).await? {
                None => {
                    let profile = self
                        .repository
                        .insert(&NewUserProfile::from(&author))
                        .await?;
                    info!(
                        "New YouTube user {} ({}, {})",
                        profile.display_name, profile.channel_id, profile.user_type
                    );
                    (profile, true, true)
                }
                Some(existing)
                    if existing.display_name != author.display_name
                        || existing.user_type != user_type =>
                {
                    let profile = self
                        .repository
                        .update_identity(&author.channel_id, &author.display_name, user_type)
                        .await?;
                    info!(
                        "Updated YouTube user {}: {} -> {}, {} -> {}",
                        profile.channel_id,
                        existing.display_name,
                        profile.display_name,
                        existing.user_type,
                        profile.user_type
                    );
                    (profile, false, true)
                }
                Some(existing) => (existing, false, false),
            };

        let remote_url = author
            .profile_image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());
        let remote_changed =
            remote_url.is_some_and(|url| profile.avatar_remote_url.as_deref() != Some(url));
        let missing = profile.avatar_path.is_none();

        let mut avatar = None;
        if identity_changed || remote_changed || missing {
            if let Some((path, remote_url)) =
                self.try_acquire(&author.channel_id, remote_url).await?
            {
                profile.avatar_path = Some(path.clone());
                profile.avatar_remote_url = Some(remote_url);
                avatar = Some(path);
            }
        }

        Ok(ProfileOutcome {
            profile,
            is_new,
            identity_changed,
            avatar,
        })
    }

    #[instrument(skip(self), fields(channel_id = %channel_id))]
    async fn refresh_avatar(
        &self,
        channel_id: &ChannelId,
        remote_url: Option<&str>,
    ) -> Result<Option<AvatarPath>, ProfileError> {
        if self.repository.find_by_channel_id(channel_id).await?.is_none() {
            return Err(ProfileError::NotFound(channel_id.to_string()));
        }

        Ok(self
            .try_acquire(channel_id, remote_url)
            .await?
            .map(|(path, _)| path))
    }

    async fn profile(&self, channel_id: &ChannelId) -> Result<Option<UserProfile>, ProfileError> {
        self.repository.find_by_channel_id(channel_id).await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        adapters::outbound::{
            media::FilesystemAvatarStore,
            sqlite::{memory_pool, SqliteProfileRepository},
        },
        domain::{
            models::UserType,
            ports::outbound::{MockAvatarFetcher, MockChannelLookup},
            services::AvatarServiceImpl,
        },
    };

    type TestAvatars =
        AvatarServiceImpl<MockChannelLookup, MockAvatarFetcher, FilesystemAvatarStore>;

    struct Fixture {
        _root: TempDir,
        root_path: std::path::PathBuf,
        lookup: Arc<MockChannelLookup>,
        fetcher: Arc<MockAvatarFetcher>,
        handler: UserPersistenceHandler<SqliteProfileRepository, TestAvatars>,
    }

    async fn fixture(lookup: MockChannelLookup) -> Fixture {
        let pool = memory_pool().await;

        let root = TempDir::new().unwrap();
        let root_path = root.path().to_path_buf();
        let lookup = Arc::new(lookup);
        let fetcher = Arc::new(MockAvatarFetcher::new());
        let store = Arc::new(FilesystemAvatarStore::new(&root_path, "media/yt_avatars"));
        let avatars = Arc::new(AvatarServiceImpl::new(
            Arc::clone(&lookup),
            Arc::clone(&fetcher),
            store,
        ));
        let handler =
            UserPersistenceHandler::new(Arc::new(SqliteProfileRepository::new(pool)), avatars);

        Fixture {
            _root: root,
            root_path,
            lookup,
            fetcher,
            handler,
        }
    }

    fn author(name: &str, moderator: bool, image: Option<&str>) -> ChatAuthor {
        ChatAuthor {
            channel_id: ChannelId::parse("UCtest001").unwrap(),
            display_name: name.to_string(),
            is_owner: false,
            is_moderator: moderator,
            is_sponsor: false,
            profile_image_url: image.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn new_user_gets_avatar_from_lookup() {
        let fx = fixture(MockChannelLookup::with(
            "UCtest001",
            "https://yt3.example/s88.jpg",
        ))
        .await;
        fx.fetcher
            .serve("https://yt3.example/s88.jpg", b"avatar", Some("image/jpeg"));

        let outcome = fx
            .handler
            .handle_message(author("TestUser001", true, None))
            .await
            .unwrap();

        assert!(outcome.is_new);
        assert_eq!(outcome.profile.user_type, UserType::Moderator);
        assert_eq!(
            outcome.avatar.as_ref().map(AvatarPath::as_str),
            Some("media/yt_avatars/UCtest001.jpg")
        );

        let stored = fx
            .handler
            .profile(&ChannelId::parse("UCtest001").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.avatar_path, outcome.avatar);
        assert_eq!(
            stored.avatar_remote_url.as_deref(),
            Some("https://yt3.example/s88.jpg")
        );
        assert!(fx.root_path.join("media/yt_avatars/UCtest001.jpg").exists());
    }

    #[tokio::test]
    async fn lookup_miss_still_persists_user() {
        let fx = fixture(MockChannelLookup::empty()).await;

        let outcome = fx
            .handler
            .handle_message(author("TestUser001", false, None))
            .await
            .unwrap();

        assert!(outcome.is_new);
        assert_eq!(outcome.avatar, None);

        let stored = fx
            .handler
            .profile(&ChannelId::parse("UCtest001").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.display_name, "TestUser001");
        assert_eq!(stored.avatar_path, None);
        assert!(!fx.root_path.join("media/yt_avatars").exists());
    }

    #[tokio::test]
    async fn download_failure_keeps_previous_avatar() {
        let fx = fixture(MockChannelLookup::empty()).await;
        fx.fetcher
            .serve("https://yt3.example/v1.png", b"v1", Some("image/png"));

        fx.handler
            .handle_message(author("Name", false, Some("https://yt3.example/v1.png")))
            .await
            .unwrap();
        let outcome = fx
            .handler
            .handle_message(author("Name", false, Some("https://yt3.example/missing.png")))
            .await
            .unwrap();

        assert_eq!(outcome.avatar, None);
        assert_eq!(
            outcome.profile.avatar_path.as_ref().map(AvatarPath::as_str),
            Some("media/yt_avatars/UCtest001.png")
        );
    }

    #[tokio::test]
    async fn unchanged_author_is_not_refetched() {
        let fx = fixture(MockChannelLookup::empty()).await;
        fx.fetcher
            .serve("https://yt3.example/a.jpg", b"a", Some("image/jpeg"));

        let first = author("Name", false, Some("https://yt3.example/a.jpg"));
        fx.handler.handle_message(first.clone()).await.unwrap();
        let outcome = fx.handler.handle_message(first).await.unwrap();

        assert!(!outcome.is_new);
        assert!(!outcome.identity_changed);
        assert_eq!(outcome.avatar, None);
        assert_eq!(fx.fetcher.requested().len(), 1);
    }

    #[tokio::test]
    async fn changed_image_url_overwrites_file() {
        let fx = fixture(MockChannelLookup::empty()).await;
        fx.fetcher
            .serve("https://yt3.example/a.jpg", b"first", Some("image/jpeg"));
        fx.fetcher
            .serve("https://yt3.example/b.jpg", b"second", Some("image/jpeg"));

        fx.handler
            .handle_message(author("Name", false, Some("https://yt3.example/a.jpg")))
            .await
            .unwrap();
        let outcome = fx
            .handler
            .handle_message(author("Name", false, Some("https://yt3.example/b.jpg")))
            .await
            .unwrap();

        assert_eq!(
            outcome.avatar.as_ref().map(AvatarPath::as_str),
            Some("media/yt_avatars/UCtest001.jpg")
        );
        let bytes = std::fs::read(fx.root_path.join("media/yt_avatars/UCtest001.jpg")).unwrap();
        assert_eq!(bytes, b"second");
    }

    #[tokio::test]
    async fn role_change_updates_profile_and_refreshes_avatar() {
        let fx = fixture(MockChannelLookup::with(
            "UCtest001",
            "https://yt3.example/s88.jpg",
        ))
        .await;
        fx.fetcher
            .serve("https://yt3.example/s88.jpg", b"avatar", Some("image/jpeg"));

        fx.handler
            .handle_message(author("Name", false, None))
            .await
            .unwrap();
        let outcome = fx
            .handler
            .handle_message(author("Name", true, None))
            .await
            .unwrap();

        assert!(outcome.identity_changed);
        assert_eq!(outcome.profile.user_type, UserType::Moderator);
        assert_eq!(fx.lookup.call_count(), 2);
    }

    #[tokio::test]
    async fn missing_avatar_is_retried_on_next_message() {
        let fx = fixture(MockChannelLookup::empty()).await;
        fx.handler
            .handle_message(author("Name", false, None))
            .await
            .unwrap();

        fx.fetcher
            .serve("https://yt3.example/late.png", b"late", Some("image/png"));
        let outcome = fx
            .handler
            .handle_message(author("Name", false, Some("https://yt3.example/late.png")))
            .await
            .unwrap();

        assert!(!outcome.identity_changed);
        assert_eq!(
            outcome.avatar.as_ref().map(AvatarPath::as_str),
            Some("media/yt_avatars/UCtest001.png")
        );
        assert_eq!(fx.lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn unwritable_avatar_dir_still_persists_user() {
        let fx = fixture(MockChannelLookup::empty()).await;
        std::fs::write(fx.root_path.join("media"), b"not a dir").unwrap();
        fx.fetcher
            .serve("https://yt3.example/a.jpg", b"a", Some("image/jpeg"));

        let outcome = fx
            .handler
            .handle_message(author("Name", false, Some("https://yt3.example/a.jpg")))
            .await
            .unwrap();

        assert!(outcome.is_new);
        assert_eq!(outcome.avatar, None);
        let stored = fx
            .handler
            .profile(&ChannelId::parse("UCtest001").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.display_name, "Name");
        assert_eq!(stored.avatar_path, None);
        assert_eq!(stored.avatar_remote_url, None);
    }

    #[tokio::test]
    async fn refresh_requires_existing_profile() {
        let fx = fixture(MockChannelLookup::empty()).await;

        let err = fx
            .handler
            .refresh_avatar(&ChannelId::parse("UCnobody").unwrap(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::NotFound(_)));
    }

    #[tokio::test]
    async fn refresh_stores_new_path() {
        let fx = fixture(MockChannelLookup::empty()).await;
        fx.fetcher
            .serve("https://yt3.example/new.webp", b"webp", Some("image/webp"));
        fx.handler
            .handle_message(author("Name", false, None))
            .await
            .unwrap();

        let path = fx
            .handler
            .refresh_avatar(
                &ChannelId::parse("UCtest001").unwrap(),
                Some("https://yt3.example/new.webp"),
            )
            .await
            .unwrap();

        assert_eq!(
            path.as_ref().map(AvatarPath::as_str),
            Some("media/yt_avatars/UCtest001.webp")
        );
        let stored = fx
            .handler
            .profile(&ChannelId::parse("UCtest001").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.avatar_path, path);
    }
}
