//! Wire types for the Circles search API
//!
//! The unified endpoint returns four category buckets. Responses with
//! missing buckets deserialize as empty lists rather than failing, since
//! rendering indexes into all four unconditionally.

use serde::{Deserialize, Serialize};

/// Which category a result belongs to. Exactly one per result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Restaurant,
    List,
    Post,
    User,
}

impl ResultKind {
    /// All kinds, in tab display order
    pub const ALL: [ResultKind; 4] = [
        ResultKind::Restaurant,
        ResultKind::List,
        ResultKind::Post,
        ResultKind::User,
    ];

    /// Plural label used for tab headers
    pub fn plural_label(&self) -> &'static str {
        match self {
            ResultKind::Restaurant => "Restaurants",
            ResultKind::List => "Lists",
            ResultKind::Post => "Posts",
            ResultKind::User => "People",
        }
    }

    /// Identifier used by the analytics endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Restaurant => "restaurant",
            ResultKind::List => "list",
            ResultKind::Post => "post",
            ResultKind::User => "user",
        }
    }
}

/// Optional structured metadata attached to a result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultMetadata {
    pub member_count: Option<u64>,
    pub list_count: Option<u64>,
    pub post_count: Option<u64>,
    pub likes: Option<u64>,
    pub verified: Option<bool>,
    pub category: Option<String>,
    pub price_range: Option<String>,
}

impl ResultMetadata {
    pub fn is_empty(&self) -> bool {
        self.member_count.is_none()
            && self.list_count.is_none()
            && self.post_count.is_none()
            && self.likes.is_none()
            && self.verified.is_none()
            && self.category.is_none()
            && self.price_range.is_none()
    }
}

/// A single search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: ResultKind,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub metadata: Option<ResultMetadata>,
}

fn default_kind() -> ResultKind {
    ResultKind::Restaurant
}

impl SearchResult {
    /// App route this result links to
    pub fn route(&self) -> String {
        match self.kind {
            ResultKind::Restaurant => format!("/restaurant/{}", self.id),
            ResultKind::List => format!("/lists/{}", self.id),
            ResultKind::Post => format!("/post/{}", self.id),
            ResultKind::User => format!("/profile/{}", self.id),
        }
    }
}

/// Response of `GET /api/search/unified`, one bucket per category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultSet {
    pub restaurants: Vec<SearchResult>,
    pub lists: Vec<SearchResult>,
    pub posts: Vec<SearchResult>,
    pub users: Vec<SearchResult>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl SearchResultSet {
    /// Bucket for a given kind
    pub fn bucket(&self, kind: ResultKind) -> &[SearchResult] {
        match kind {
            ResultKind::Restaurant => &self.restaurants,
            ResultKind::List => &self.lists,
            ResultKind::Post => &self.posts,
            ResultKind::User => &self.users,
        }
    }

    /// Total hits across all four buckets
    pub fn total(&self) -> usize {
        self.restaurants.len() + self.lists.len() + self.posts.len() + self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Stamp every result with the kind of the bucket it arrived in.
    /// The server is trusted on bucketing, not on per-item tags.
    pub fn tag_kinds(&mut self) {
        for kind in ResultKind::ALL {
            let bucket = match kind {
                ResultKind::Restaurant => &mut self.restaurants,
                ResultKind::List => &mut self.lists,
                ResultKind::Post => &mut self.posts,
                ResultKind::User => &mut self.users,
            };
            for result in bucket.iter_mut() {
                result.kind = kind;
            }
        }
    }
}

/// Entry of `GET /api/search-analytics/trending`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingItem {
    pub query: String,
    #[serde(default)]
    pub search_count: Option<u64>,
}

impl TrendingItem {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_count: None,
        }
    }
}

/// Body of `POST /api/search-analytics/track`. Fire-and-forget telemetry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEvent {
    pub query: String,
    pub category: String,
    pub result_count: usize,
    pub clicked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicked_result_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicked_result_type: Option<String>,
}

impl TrackEvent {
    /// Impression event for a completed search
    pub fn impression(query: &str, category: ResultKind, result_count: usize) -> Self {
        Self {
            query: query.to_string(),
            category: category.as_str().to_string(),
            result_count,
            clicked: false,
            clicked_result_id: None,
            clicked_result_type: None,
        }
    }

    /// Click event for an activated result
    pub fn click(query: &str, result: &SearchResult) -> Self {
        Self {
            query: query.to_string(),
            category: result.kind.as_str().to_string(),
            result_count: 0,
            clicked: true,
            clicked_result_id: Some(result.id.clone()),
            clicked_result_type: Some(result.kind.as_str().to_string()),
        }
    }
}
