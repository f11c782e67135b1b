//! Recent-search persistence and trending fallback
//!
//! The recent list is a JSON array of strings on disk, most-recent-first,
//! capped, deduplicated by exact match. A missing or corrupt file loads
//! as empty. If a save fails the store keeps working in memory for the
//! rest of the session; search itself is never blocked on persistence.

use crate::api::types::TrendingItem;
use crate::logging;
use std::fs;
use std::path::PathBuf;

/// Shown when the trending endpoint is unreachable. A deliberate UX
/// decision carried over from the production client: an unreachable
/// endpoint degrades to canned queries, not to a blank section.
pub const TRENDING_FALLBACK: [&str; 4] = [
    "Best pizza NYC",
    "Date night restaurants",
    "Brunch spots",
    "Ramen adventures",
];

/// Build the static fallback trending list
pub fn trending_fallback() -> Vec<TrendingItem> {
    TRENDING_FALLBACK
        .iter()
        .map(|q| TrendingItem::new(*q))
        .collect()
}

/// Persisted recent-search list with move-to-front semantics
pub struct RecentSearches {
    entries: Vec<String>,
    cap: usize,
    path: Option<PathBuf>,
    persist_broken: bool,
}

impl RecentSearches {
    /// Default storage location (same directory as the executable)
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("circles-recent.json")
    }

    /// Load from disk. Any read or parse failure yields an empty list.
    pub fn load(path: PathBuf, cap: usize) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(mut list) => {
                    list.truncate(cap);
                    list
                }
                Err(e) => {
                    logging::warn("HISTORY", &format!("corrupt recent file, starting empty: {}", e));
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            entries,
            cap,
            path: Some(path),
            persist_broken: false,
        }
    }

    /// In-memory store, for tests and for sessions without a home on disk
    pub fn in_memory(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
            path: None,
            persist_broken: false,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a committed query: move-to-front, dedup, truncate, save
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.entries.retain(|q| q != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.cap);
        self.save();
    }

    /// Drop all entries, on disk too
    pub fn clear(&mut self) {
        self.entries.clear();
        self.save();
    }

    fn save(&mut self) {
        if self.persist_broken {
            return;
        }
        let Some(path) = &self.path else {
            return;
        };

        let result = serde_json::to_string(&self.entries)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            // Degrade to in-memory for the rest of the session
            self.persist_broken = true;
            logging::warn(
                "HISTORY",
                &format!("save failed, recent searches are memory-only now: {}", e),
            );
        }
    }

    /// Merge the server-side recent list after the local one, skipping
    /// duplicates, up to `limit` entries total. Display-only.
    pub fn merged_with(&self, server_recent: &[String], limit: usize) -> Vec<String> {
        let mut merged: Vec<String> = self.entries.clone();
        for q in server_recent {
            if merged.len() >= limit {
                break;
            }
            if !merged.iter().any(|m| m == q) {
                merged.push(q.clone());
            }
        }
        merged.truncate(limit);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_moves_to_front_without_duplicates() {
        let mut recent = RecentSearches::in_memory(5);
        recent.record("sushi");
        recent.record("pizza");
        recent.record("sushi");
        assert_eq!(recent.entries(), &["sushi", "pizza"]);
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut recent = RecentSearches::in_memory(5);
        for q in ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"] {
            recent.record(q);
        }
        assert_eq!(recent.entries(), &["j", "i", "h", "g", "f"]);
    }

    #[test]
    fn blank_queries_are_ignored() {
        let mut recent = RecentSearches::in_memory(5);
        recent.record("   ");
        recent.record("");
        assert!(recent.is_empty());
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");

        let mut recent = RecentSearches::load(path.clone(), 5);
        recent.record("tacos");
        recent.record("pho");

        let reloaded = RecentSearches::load(path, 5);
        assert_eq!(reloaded.entries(), &["pho", "tacos"]);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");
        fs::write(&path, "{not json at all").unwrap();

        let recent = RecentSearches::load(path, 5);
        assert!(recent.is_empty());
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let recent = RecentSearches::load(dir.path().join("nope.json"), 5);
        assert!(recent.is_empty());
    }

    #[test]
    fn merge_appends_server_entries_without_duplicates() {
        let mut recent = RecentSearches::in_memory(5);
        recent.record("pizza");
        recent.record("sushi");

        let merged = recent.merged_with(
            &["pizza".into(), "brunch".into(), "wine bars".into()],
            4,
        );
        assert_eq!(merged, &["sushi", "pizza", "brunch", "wine bars"]);
    }

    #[test]
    fn clear_empties_disk_too() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");

        let mut recent = RecentSearches::load(path.clone(), 5);
        recent.record("tapas");
        recent.clear();

        let reloaded = RecentSearches::load(path, 5);
        assert!(reloaded.is_empty());
    }
}
