mod client;
pub mod domain;
mod youtube_url;

pub(crate) use youtube_url::*;

pub use client::*;
pub use domain::*;
