//! Application configuration
//!
//! Defaults match the production Circles client: 300ms debounce, 2-char
//! query floor, 30s fresh / 5min GC cache windows, 5 recent searches.
//! Each field can be overridden from the environment (`CIRCLES_*`).

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Circles API
    pub base_url: String,
    /// Debounce interval between last keystroke and dispatch
    pub debounce: Duration,
    /// Queries shorter than this never hit the network
    pub min_query_len: usize,
    /// Results requested per category page
    pub page_limit: usize,
    /// Maximum persisted recent searches
    pub recent_cap: usize,
    /// Trending entries requested on open
    pub trending_limit: usize,
    /// Server-side recent entries requested on open
    pub server_recent_limit: usize,
    /// Cache window within which a hit skips the network
    pub cache_fresh_ttl: Duration,
    /// Cache horizon after which an entry is dropped
    pub cache_gc_ttl: Duration,
    /// Maximum cached queries
    pub cache_capacity: usize,
    /// HTTP request timeout
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            debounce: Duration::from_millis(300),
            min_query_len: 2,
            page_limit: 20,
            recent_cap: 5,
            trending_limit: 8,
            server_recent_limit: 10,
            cache_fresh_ttl: Duration::from_secs(30),
            cache_gc_ttl: Duration::from_secs(300),
            cache_capacity: 64,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl AppConfig {
    /// Build a config from defaults, then environment overrides
    pub fn load() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = env::var("CIRCLES_API_URL") {
            cfg.base_url = url;
        }
        cfg.debounce = Duration::from_millis(try_load("CIRCLES_DEBOUNCE_MS", 300));
        cfg.min_query_len = try_load("CIRCLES_MIN_QUERY_LEN", cfg.min_query_len);
        cfg.page_limit = try_load("CIRCLES_PAGE_LIMIT", cfg.page_limit);
        cfg.recent_cap = try_load("CIRCLES_RECENT_CAP", cfg.recent_cap);
        cfg
    }
}

fn try_load<T: FromStr + Copy>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            crate::logging::warn("CONFIG", &format!("Invalid {} value: {}", key, e));
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_policy() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.debounce, Duration::from_millis(300));
        assert_eq!(cfg.min_query_len, 2);
        assert_eq!(cfg.recent_cap, 5);
        assert_eq!(cfg.cache_fresh_ttl, Duration::from_secs(30));
        assert_eq!(cfg.cache_gc_ttl, Duration::from_secs(300));
        assert!(cfg.cache_capacity > 0);
    }
}
