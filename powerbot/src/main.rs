use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use powerbot::{
    adapters::{
        inbound::chat::ChatListener,
        outbound::sqlite::{self, MIGRATOR},
    },
    config::read_config,
    domain::{
        models::ChannelId,
        ports::inbound::{AvatarService, UserPersistence},
    },
    factory,
};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "powerbot")]
#[command(about = "Persists YouTube live chat authors and caches their avatars")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read live chat messages as JSON lines from stdin
    Listen,
    /// Re-download the avatar for a stored profile
    Refresh {
        channel_id: String,
        /// Image URL to download instead of looking up the channel thumbnail
        #[arg(long)]
        url: Option<String>,
    },
    /// Print a stored profile as JSON
    Show { channel_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::LocalTime::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let settings = read_config().context("Failed to read configuration")?;

    let pool = sqlite::connect(&settings.database)
        .await
        .with_context(|| format!("Failed to open {}", settings.database.filename.display()))?;
    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let store = Arc::new(factory::avatar_store(&settings));
    store
        .initialize()
        .await
        .with_context(|| format!("Failed to create {}", store.directory().display()))?;

    let avatars = Arc::new(
        factory::avatar_service(&settings, store).context("Failed to build HTTP client")?,
    );
    let persistence = Arc::new(factory::user_persistence(pool, Arc::clone(&avatars)));

    match cli.command {
        Commands::Listen => {
            let stdin = BufReader::new(tokio::io::stdin());
            let stats = ChatListener::new(persistence)
                .run(stdin)
                .await
                .context("Failed to read chat input")?;
            println!(
                "processed={} new_users={} avatars={} skipped={} failed={}",
                stats.processed, stats.new_users, stats.avatars, stats.skipped, stats.failed
            );
        }
        Commands::Refresh { channel_id, url } => {
            let channel_id = ChannelId::parse(channel_id).context("Invalid channel id")?;
            match persistence
                .refresh_avatar(&channel_id, url.as_deref())
                .await?
            {
                Some(path) => println!("{path}"),
                None => anyhow::bail!("No avatar could be downloaded for {channel_id}"),
            }
        }
        Commands::Show { channel_id } => {
            let channel_id = ChannelId::parse(channel_id).context("Invalid channel id")?;
            let profile = persistence
                .profile(&channel_id)
                .await?
                .with_context(|| format!("No profile stored for {channel_id}"))?;
            let local = avatars.local_path(&channel_id).await;

            let output = serde_json::json!({
                "profile": profile,
                "localAvatar": local.map(|path| path.to_string()),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
