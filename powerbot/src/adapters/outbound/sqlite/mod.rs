mod profile;

pub use profile::SqliteProfileRepository;

use sqlx::{migrate::Migrator, sqlite::SqlitePoolOptions, SqlitePool};

use crate::config::DatabaseSettings;

pub static MIGRATOR: Migrator = sqlx::migrate!();

pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = settings.filename.parent() {
        if settings.create_if_missing && !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(settings.connect_options())
        .await
}

/// Single-connection in-memory database with migrations applied.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}
