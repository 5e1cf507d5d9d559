mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{EnrichmentPayload, InfluencerRecord, SearchQuery, SummaryRequest};

pub use http::HttpInfluencerApi;

/// The three upstream endpoints the search pipeline talks to.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait InfluencerApi: Send + Sync {
    /// `GET /search`. Non-2xx maps to [`crate::error::PilotError::Upstream`].
    async fn search(&self, query: &SearchQuery) -> Result<Vec<InfluencerRecord>>;

    /// `GET /insights` for one subject identifier.
    async fn insights(&self, subject_id: &str) -> Result<EnrichmentPayload>;

    /// `POST /summary`. Returns `None` when the backend answered without text.
    async fn summary(&self, request: &SummaryRequest) -> Result<Option<String>>;
}
