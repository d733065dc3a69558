//! Response generator trait and the constant-data implementation.
//!
//! Handlers only see `Arc<dyn ResponseGenerator>`; a real retrieval
//! backend replaces [`MockGenerator`] without touching validation or
//! transport. Generators return bare payloads; request echoing and thread
//! correlation happen in [`crate::correlate`].

use ragux_core::Result;
use ragux_protocol::{FollowupRequest, Mode, SearchRequest, SearchResponse};
use tracing::debug;

use crate::corpus::{CorpusStats, MockCorpus};

/// Trait for response backends.
pub trait ResponseGenerator: Send + Sync {
    /// Short name reported by `/api/health`.
    fn name(&self) -> &str;

    /// Payload for a validated search.
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// Payload for a follow-up turn in an existing thread.
    fn followup(&self, request: &FollowupRequest) -> Result<SearchResponse>;

    /// Payload for a stored answer.
    fn answer(&self, id: &str, mode: Mode) -> Result<SearchResponse>;

    /// Size of the backing data, if the backend knows it.
    fn stats(&self) -> Option<CorpusStats> {
        None
    }
}

/// Serves the same corpus for every request, whatever the query or filters.
///
/// A retrieval backend is expected to narrow with
/// [`SearchFilters::narrow`](ragux_protocol::SearchFilters::narrow); the mock
/// only logs how many quotes would have matched.
pub struct MockGenerator {
    corpus: MockCorpus,
}

impl MockGenerator {
    pub fn new(corpus: MockCorpus) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &MockCorpus {
        &self.corpus
    }
}

impl ResponseGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        debug!(
            mode = %request.mode,
            query_type = %request.query_type,
            "Serving mock search payload"
        );
        if let Some(filters) = request.filters.as_ref().filter(|f| !f.is_empty()) {
            let matching = filters.narrow(&self.corpus.search.quotes).len();
            debug!(matching, "Filters echoed, payload left whole");
        }
        Ok(self.corpus.search.clone())
    }

    fn followup(&self, request: &FollowupRequest) -> Result<SearchResponse> {
        debug!(thread_id = %request.thread_id, "Serving mock follow-up payload");
        Ok(SearchResponse {
            summary: self.corpus.followup_summary.clone(),
            ..self.corpus.search.clone()
        })
    }

    fn answer(&self, id: &str, mode: Mode) -> Result<SearchResponse> {
        debug!(id, %mode, "Serving mock answer payload");
        Ok(self.corpus.search.clone())
    }

    fn stats(&self) -> Option<CorpusStats> {
        Some(self.corpus.stats())
    }
}
