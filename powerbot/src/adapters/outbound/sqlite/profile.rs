use async_trait::async_trait;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::domain::{
    models::{AvatarPath, ChannelId, NewUserProfile, UserProfile, UserType},
    ports::outbound::ProfileRepository,
    ProfileError,
};

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    youtube_channel_id: String,
    youtube_username: String,
    user_type: String,
    channel_avatar_url: Option<String>,
    avatar_remote_url: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = ProfileError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let channel_id = ChannelId::parse(row.youtube_channel_id)
            .map_err(|err| ProfileError::Storage(format!("stored channel id: {err}")))?;

        Ok(UserProfile {
            id: row.id,
            channel_id,
            display_name: row.youtube_username,
            user_type: UserType::from(row.user_type),
            avatar_path: row.channel_avatar_url.map(AvatarPath::from),
            avatar_remote_url: row.avatar_remote_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn storage_error(err: sqlx::Error) -> ProfileError {
    ProfileError::Storage(err.to_string())
}

const PROFILE_COLUMNS: &str = "id, youtube_channel_id, youtube_username, user_type, \
     channel_avatar_url, avatar_remote_url, created_at, updated_at";

pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn find_by_channel_id(
        &self,
        channel_id: &ChannelId,
    ) -> Result<Option<UserProfile>, ProfileError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM youtube_profile WHERE youtube_channel_id = ?"
        ))
        .bind(channel_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(UserProfile::try_from).transpose()
    }

    async fn insert(&self, profile: &NewUserProfile) -> Result<UserProfile, ProfileError> {
        let now = OffsetDateTime::now_utc();
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            INSERT INTO youtube_profile (youtube_channel_id, youtube_username, user_type, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (youtube_channel_id) DO UPDATE
            SET youtube_username = excluded.youtube_username,
                user_type = excluded.user_type,
                updated_at = excluded.updated_at
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(profile.channel_id.as_str())
        .bind(&profile.display_name)
        .bind(profile.user_type.to_string())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        row.try_into()
    }

    async fn update_identity(
        &self,
        channel_id: &ChannelId,
        display_name: &str,
        user_type: UserType,
    ) -> Result<UserProfile, ProfileError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            UPDATE youtube_profile
            SET youtube_username = ?, user_type = ?, updated_at = ?
            WHERE youtube_channel_id = ?
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(display_name)
        .bind(user_type.to_string())
        .bind(OffsetDateTime::now_utc())
        .bind(channel_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| ProfileError::NotFound(channel_id.to_string()))?;

        row.try_into()
    }

    async fn set_avatar(
        &self,
        channel_id: &ChannelId,
        path: &AvatarPath,
        remote_url: &str,
    ) -> Result<(), ProfileError> {
        let result = sqlx::query(
            r#"
            UPDATE youtube_profile
            SET channel_avatar_url = ?, avatar_remote_url = ?, updated_at = ?
            WHERE youtube_channel_id = ?
            "#,
        )
        .bind(path.as_str())
        .bind(remote_url)
        .bind(OffsetDateTime::now_utc())
        .bind(channel_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(ProfileError::NotFound(channel_id.to_string()));
        }

        Ok(())
    }
}
