mod avatar;
mod user_persistence;

pub use avatar::*;
pub use user_persistence::*;
