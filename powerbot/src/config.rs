use std::{path::PathBuf, str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use strum::{Display, EnumString};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub youtube: YoutubeSettings,
    pub avatars: AvatarSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    /// Directory every stored relative path is resolved against.
    pub media_root: PathBuf,
    /// Avatar directory relative to `media_root`, using `/` separators.
    pub avatar_dir: String,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub filename: PathBuf,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub create_if_missing: bool,
}

#[derive(Deserialize, Clone)]
pub struct YoutubeSettings {
    pub api_base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for YoutubeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeSettings")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct AvatarSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_image_bytes: u64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub request_timeout_secs: u64,
}

impl AvatarSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.filename)
            .create_if_missing(self.create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("Failed to parse APP_ENVIRONMENT: {e}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(
            config::File::from(config_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("POWERBOT")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
