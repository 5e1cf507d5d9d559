use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::InfluencerApi;
use crate::config::ApiConfig;
use crate::error::{PilotError, Result};
use crate::models::{
    EnrichmentPayload, InfluencerRecord, SearchQuery, SummaryRequest, SummaryResponse,
};

/// Every field may be missing or `null`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
    #[serde(default)]
    cached: Option<bool>,
    #[serde(default)]
    stale: Option<bool>,
}

/// reqwest-backed [`InfluencerApi`].
///
/// Requests carry no credentials; the optional user id travels as a query
/// parameter and is interpreted by the backend only.
#[derive(Clone)]
pub struct HttpInfluencerApi {
    client: Client,
    config: ApiConfig,
}

impl HttpInfluencerApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PilotError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    async fn ensure_success(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(PilotError::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl InfluencerApi for HttpInfluencerApi {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<InfluencerRecord>> {
        let mut url = self.endpoint(&self.config.search_path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("keyword", &query.keyword)
                .append_pair("limit", &query.limit.to_string());
            if let Some(user_id) = &query.user_id {
                pairs.append_pair("user_id", user_id);
            }
        }

        debug!(keyword = %query.keyword, limit = query.limit, "Requesting search results");
        let resp = Self::ensure_success(self.client.get(url).send().await?).await?;
        let body = resp.text().await?;

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| PilotError::InvalidResponse(format!("search response: {e}")))?;

        if parsed.stale.unwrap_or_default() {
            warn!(keyword = %query.keyword, "Search service returned stale cached results");
        }

        let results = parsed.results.unwrap_or_default();
        let total = results.len();
        let records: Vec<InfluencerRecord> = results
            .into_iter()
            .filter_map(|value| InfluencerRecord::try_from(value).ok())
            .collect();

        if records.len() < total {
            warn!(
                dropped = total - records.len(),
                "Ignoring search results that are not JSON objects"
            );
        }

        debug!(
            count = records.len(),
            backend_cached = parsed.cached.unwrap_or_default(),
            "Search results received"
        );
        Ok(records)
    }

    async fn insights(&self, subject_id: &str) -> Result<EnrichmentPayload> {
        let mut url = self.endpoint(&self.config.insights_path)?;
        url.query_pairs_mut().append_pair("user_id", subject_id);

        let resp = Self::ensure_success(self.client.get(url).send().await?).await?;
        let body = resp.text().await?;

        match serde_json::from_str::<Value>(&body)? {
            Value::Object(fields) => Ok(EnrichmentPayload::new(fields)),
            other => Err(PilotError::InvalidResponse(format!(
                "insights for {subject_id} was not an object: {other}"
            ))),
        }
    }

    async fn summary(&self, request: &SummaryRequest) -> Result<Option<String>> {
        let url = self.endpoint(&self.config.summary_path)?;

        debug!(username = %request.username, "Requesting summary");
        let resp = Self::ensure_success(self.client.post(url).json(request).send().await?).await?;
        let body = resp.text().await?;

        let parsed: SummaryResponse = serde_json::from_str(&body)
            .map_err(|e| PilotError::InvalidResponse(format!("summary response: {e}")))?;

        Ok(parsed
            .summary
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}
