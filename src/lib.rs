//! Circles Search - terminal client for the Circles dining app's
//! unified search.
//!
//! Users of the Circles app search across restaurants, shareable lists,
//! posts, and people through one endpoint. This crate reimplements the
//! client side of that feature for the terminal: a debounced input, a
//! bounded TTL cache over the search endpoint, a persisted recent-search
//! list with a trending fallback, and a keyboard-driven result browser.
//!
//! # Example
//!
//! ```no_run
//! use circles_search::api::SearchClient;
//! use std::time::Duration;
//!
//! fn main() -> circles_search::Result<()> {
//!     let client = SearchClient::new("http://localhost:5000", Duration::from_secs(10))?;
//!     let results = client.search("pizza", 1, 20)?;
//!
//!     println!("{} restaurants", results.restaurants.len());
//!     for hit in &results.restaurants {
//!         println!("{} - {}", hit.name, hit.subtitle);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod history;
pub mod logging;
pub mod tui;

// Re-export main types
pub use api::{ResultKind, SearchClient, SearchResult, SearchResultSet, TrendingItem};
pub use cache::{CacheLookup, QueryCache};
pub use config::AppConfig;
pub use debounce::Debouncer;
pub use error::{CirclesError, Result};
pub use history::RecentSearches;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format a count as a short human string ("12", "3.4k", "1.2M")
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        count.to_string()
    } else if count < 1_000_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_scales() {
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(3_400), "3.4k");
        assert_eq!(format_count(1_200_000), "1.2M");
    }
}
