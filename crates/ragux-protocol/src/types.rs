//! Wire types. Field names follow the JSON the UI consumes: request and
//! envelope fields are camelCase, corpus metadata is snake_case.

use serde::{Deserialize, Serialize};

/// Where the search is run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Online,
    Offline,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Online, Mode::Offline];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of input the query carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Text,
    Image,
}

impl QueryType {
    pub const ALL: [QueryType; 2] = [QueryType::Text, QueryType::Image];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == s)
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional search filters. Accepted and echoed; the mock corpus ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.iteration.is_none() && self.scenario.is_none() && self.date.is_none()
    }

    /// `iteration` and `date` must match exactly (date ignoring surrounding
    /// whitespace); `scenario` is a case-insensitive substring of the tags.
    pub fn matches(&self, metadata: &QuoteMetadata) -> bool {
        if let Some(iteration) = non_blank(&self.iteration) {
            if metadata.iteration != iteration {
                return false;
            }
        }
        if let Some(date) = non_blank(&self.date) {
            if metadata.date.trim() != date.trim() {
                return false;
            }
        }
        if let Some(scenario) = non_blank(&self.scenario) {
            let tags = metadata.tags.as_deref().unwrap_or_default().to_lowercase();
            if !tags.contains(&scenario.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Quotes that pass the filters, or all of them when none do.
    pub fn narrow<'a>(&self, quotes: &'a [Quote]) -> Vec<&'a Quote> {
        let matching: Vec<&Quote> = quotes.iter().filter(|q| self.matches(&q.metadata)).collect();
        if matching.is_empty() {
            quotes.iter().collect()
        } else {
            matching
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub mode: Mode,
    pub query_type: QueryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowupRequest {
    pub thread_id: String,
    pub query: String,
}

/// Attribution carried by every quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteMetadata {
    /// Id of the [`Source`] the quote was cut from.
    pub id: String,
    pub title: String,
    pub iteration: String,
    pub date: String,
    pub filename: String,
    pub section_path: String,
    pub chunk_index: u32,
    pub product: String,
    /// Comma-separated scenario tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub metadata: QuoteMetadata,
    /// Lower is more relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub title: String,
    pub date: String,
    pub iteration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub source_id: String,
}

/// The payload every endpoint builds on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub summary: String,
    pub quotes: Vec<Quote>,
    pub sources: Vec<Source>,
    pub images: Vec<Image>,
}

/// `/api/search` result: the payload plus the request fields echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub response: SearchResponse,
    pub mode: Mode,
    pub query_type: QueryType,
    /// Empty when the request had no query.
    pub query: String,
    /// Empty object when the request had no filters.
    pub filters: SearchFilters,
}

impl SearchResult {
    pub fn echo(response: SearchResponse, request: &SearchRequest) -> Self {
        Self {
            response,
            mode: request.mode,
            query_type: request.query_type,
            query: request.query.clone().unwrap_or_default(),
            filters: request.filters.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowupResponse {
    #[serde(flatten)]
    pub response: SearchResponse,
    pub thread_id: String,
    pub answer_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    #[serde(flatten)]
    pub response: SearchResponse,
    pub id: String,
    /// RFC 3339 time the response was generated.
    pub created_at: String,
    pub mode: Mode,
}
