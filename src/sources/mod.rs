//! Remote event feed: providers, decoding, and the HTTP client.

mod client;
mod decode;
mod error;
mod provider;

pub use client::FeedClient;
pub(crate) use client::log_fetch_failure;
pub use decode::decode;
pub use error::FeedError;
pub use provider::FeedProvider;
