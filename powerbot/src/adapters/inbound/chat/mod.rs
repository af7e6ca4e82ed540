mod conversions;
mod listener;

pub use listener::*;
