//! HTTP client for the Circles API
//!
//! Blocking client, meant to be called from worker threads so the UI
//! thread never waits on the network.

use crate::api::types::{SearchResultSet, TrackEvent, TrendingItem};
use crate::error::{CirclesError, Result};
use crate::logging;
use std::time::Duration;

/// Client for the unified search and search-analytics endpoints
#[derive(Debug, Clone)]
pub struct SearchClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search across all four categories.
    ///
    /// Callers enforce the minimum query length; the client just refuses
    /// nothing. `page` starts at 1.
    pub fn search(&self, query: &str, page: usize, limit: usize) -> Result<SearchResultSet> {
        let url = format!("{}/api/search/unified", self.base_url);
        let page = page.max(1);
        let response = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .query(&[("page", page), ("limit", limit)])
            .send()?;

        let mut set: SearchResultSet = Self::check(response)?.json()?;
        set.tag_kinds();
        Ok(set)
    }

    /// Trending queries, most popular first
    pub fn trending(&self, limit: usize) -> Result<Vec<TrendingItem>> {
        let url = format!("{}/api/search-analytics/trending", self.base_url);
        let response = self.http.get(&url).query(&[("limit", limit)]).send()?;
        Ok(Self::check(response)?.json()?)
    }

    /// Server-side recent queries (distinct from the local store)
    pub fn recent(&self, limit: usize) -> Result<Vec<String>> {
        let url = format!("{}/api/search-analytics/recent", self.base_url);
        let response = self.http.get(&url).query(&[("limit", limit)]).send()?;
        Ok(Self::check(response)?.json()?)
    }

    /// Fire-and-forget analytics. Failures are logged and swallowed.
    pub fn track(&self, event: &TrackEvent) {
        let url = format!("{}/api/search-analytics/track", self.base_url);
        match self.http.post(&url).json(event).send() {
            Ok(response) if !response.status().is_success() => {
                logging::warn(
                    "TRACK",
                    &format!("analytics endpoint returned {}", response.status()),
                );
            }
            Err(e) => {
                logging::warn("TRACK", &format!("analytics send failed: {}", e));
            }
            Ok(_) => {}
        }
    }

    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(CirclesError::Api {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped_from_base_url() {
        let client = SearchClient::new("http://localhost:5000///", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
