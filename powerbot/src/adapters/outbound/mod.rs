pub mod http;
pub mod media;
pub mod sqlite;
pub mod youtube_api;
