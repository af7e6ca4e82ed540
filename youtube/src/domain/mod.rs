mod channel;
mod live_chat;

pub use channel::*;
pub use live_chat::*;
