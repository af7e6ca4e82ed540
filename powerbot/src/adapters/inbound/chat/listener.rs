use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info, warn};
use youtube::LiveChatMessage;

use crate::domain::{models::ChatAuthor, ports::inbound::UserPersistence};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListenStats {
    pub processed: usize,
    pub new_users: usize,
    pub avatars: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Feeds live chat messages, one JSON `liveChatMessage` per line, to user persistence.
///
/// Messages are handled strictly in arrival order.
pub struct ChatListener<P> {
    persistence: Arc<P>,
}

impl<P: UserPersistence> ChatListener<P> {
    pub fn new(persistence: Arc<P>) -> Self {
        Self { persistence }
    }

    pub async fn run<R>(&self, reader: R) -> std::io::Result<ListenStats>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut stats = ListenStats::default();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let message = match serde_json::from_str::<LiveChatMessage>(line) {
                Ok(message) => message,
                Err(e) => {
                    warn!("Skipping malformed chat message: {}", e);
                    stats.skipped += 1;
                    continue;
                }
            };

            let message_id = message.id.clone();
            let author = match ChatAuthor::try_from(message) {
                Ok(author) => author,
                Err(e) => {
                    warn!("Skipping chat message {} without usable author: {}", message_id, e);
                    stats.skipped += 1;
                    continue;
                }
            };

            match self.persistence.handle_message(author).await {
                Ok(outcome) => {
                    debug!(
                        "Handled message {} from {}",
                        message_id, outcome.profile.channel_id
                    );
                    stats.processed += 1;
                    stats.new_users += usize::from(outcome.is_new);
                    stats.avatars += usize::from(outcome.avatar.is_some());
                }
                Err(e) => {
                    error!("Failed to persist author of message {}: {}", message_id, e);
                    stats.failed += 1;
                }
            }
        }

        info!(
            processed = stats.processed,
            new_users = stats.new_users,
            avatars = stats.avatars,
            skipped = stats.skipped,
            failed = stats.failed,
            "Chat input exhausted"
        );

        Ok(stats)
    }
}
