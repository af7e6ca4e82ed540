//! Composition root. The only place that names concrete outbound adapters.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    adapters::outbound::{
        http::HttpAvatarFetcher, media::FilesystemAvatarStore, sqlite::SqliteProfileRepository,
        youtube_api::YoutubeChannelLookup,
    },
    config::Settings,
    domain::services::{AvatarServiceImpl, UserPersistenceHandler},
};

pub type AvatarServiceType =
    AvatarServiceImpl<YoutubeChannelLookup, HttpAvatarFetcher, FilesystemAvatarStore>;
pub type UserPersistenceType = UserPersistenceHandler<SqliteProfileRepository, AvatarServiceType>;

pub fn avatar_store(settings: &Settings) -> FilesystemAvatarStore {
    FilesystemAvatarStore::new(
        &settings.application.media_root,
        settings.application.avatar_dir.clone(),
    )
}

pub fn avatar_service(
    settings: &Settings,
    store: Arc<FilesystemAvatarStore>,
) -> Result<AvatarServiceType, reqwest::Error> {
    let timeout = settings.avatars.request_timeout();
    let lookup = YoutubeChannelLookup::from_settings(&settings.youtube, timeout)?;
    let fetcher = HttpAvatarFetcher::new(timeout)?;

    Ok(AvatarServiceImpl::new(
        Arc::new(lookup),
        Arc::new(fetcher),
        store,
    )
    .with_max_image_bytes(settings.avatars.max_image_bytes))
}

pub fn user_persistence(
    pool: SqlitePool,
    avatars: Arc<AvatarServiceType>,
) -> UserPersistenceType {
    UserPersistenceHandler::new(Arc::new(SqliteProfileRepository::new(pool)), avatars)
}
