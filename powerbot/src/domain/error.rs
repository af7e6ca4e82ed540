use thiserror::Error;

/// Why an avatar could not be acquired.
///
/// None of these abort message handling: the profile row is still written and
/// only the avatar column keeps its previous value.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("no thumbnail url resolvable: {0}")]
    LookupFailed(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("avatar exceeds size limit of {limit} bytes")]
    SizeLimitExceeded { limit: u64 },
    #[error("failed to write avatar: {0}")]
    WriteFailed(#[from] std::io::Error),
}

impl AcquireError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// Errors from the user-profile store.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelIdError {
    #[error("channel id is empty")]
    Empty,
    #[error("channel id is {0} characters long")]
    TooLong(usize),
    #[error("channel id contains invalid character {0:?}")]
    InvalidCharacter(char),
}
