//! Circles API surface: wire types and the blocking HTTP client

pub mod client;
pub mod types;

pub use client::SearchClient;
pub use types::{
    ResultKind, ResultMetadata, SearchResult, SearchResultSet, TrackEvent, TrendingItem,
};
