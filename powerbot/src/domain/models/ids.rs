use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::domain::ChannelIdError;

const MAX_CHANNEL_ID_LEN: usize = 64;

/// A validated YouTube channel identifier.
///
/// Doubles as the avatar filename stem, so only `[A-Za-z0-9_-]` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn parse(id: impl Into<String>) -> Result<Self, ChannelIdError> {
        let id = id.into();

        if id.is_empty() {
            return Err(ChannelIdError::Empty);
        }
        if id.len() > MAX_CHANNEL_ID_LEN {
            return Err(ChannelIdError::TooLong(id.len()));
        }
        if let Some(c) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(ChannelIdError::InvalidCharacter(c));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ChannelId {
    type Err = ChannelIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ChannelId {
    type Error = ChannelIdError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::parse(id)
    }
}
