mod avatar_fetcher;

pub use avatar_fetcher::HttpAvatarFetcher;
