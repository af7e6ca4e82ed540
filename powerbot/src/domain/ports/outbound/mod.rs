mod avatar_fetcher;
mod avatar_store;
mod channel_lookup;
mod profile_repository;

pub use avatar_fetcher::*;
pub use avatar_store::*;
pub use channel_lookup::*;
pub use profile_repository::*;

#[cfg(test)]
mod mock;
#[cfg(test)]
pub use mock::*;
