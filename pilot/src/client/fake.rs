//! In-memory [`InfluencerApi`] for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;

use super::InfluencerApi;
use crate::error::{PilotError, Result};
use crate::models::{EnrichmentPayload, InfluencerRecord, SearchQuery, SummaryRequest};

/// How a scripted insights call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsightsFailure {
    Status(u16),
    /// Connection refused, surfaced as `PilotError::Network`.
    Transport,
    /// 2xx with a body that is not JSON.
    MalformedBody,
    /// 2xx with JSON that is not an object.
    NotAnObject,
}

#[derive(Default)]
pub(crate) struct FakeInfluencerApi {
    search_results: Mutex<Vec<InfluencerRecord>>,
    search_status: Mutex<Option<u16>>,
    insights: Mutex<HashMap<String, EnrichmentPayload>>,
    failing_insights: Mutex<HashMap<String, InsightsFailure>>,
    summary: Mutex<Option<Result<Option<String>>>>,
    insights_latency: Option<Duration>,
    pub search_calls: Mutex<Vec<SearchQuery>>,
    pub insights_calls: Mutex<Vec<(String, Instant)>>,
    pub summary_calls: Mutex<Vec<SummaryRequest>>,
}

pub(crate) fn record(value: Value) -> InfluencerRecord {
    InfluencerRecord::try_from(value).expect("test record must be an object")
}

pub(crate) fn payload(value: Value) -> EnrichmentPayload {
    match value {
        Value::Object(fields) => EnrichmentPayload::new(fields),
        other => panic!("test payload must be an object, got {other}"),
    }
}

impl FakeInfluencerApi {
    pub fn with_results(records: Vec<InfluencerRecord>) -> Self {
        let api = Self::default();
        *api.search_results.lock().unwrap() = records;
        api
    }

    pub fn set_results(&self, records: Vec<InfluencerRecord>) {
        *self.search_results.lock().unwrap() = records;
    }

    pub fn fail_search(&self, status: u16) {
        *self.search_status.lock().unwrap() = Some(status);
    }

    pub fn with_insights(self, subject_id: &str, value: Value) -> Self {
        self.insights
            .lock()
            .unwrap()
            .insert(subject_id.to_string(), payload(value));
        self
    }

    pub fn with_failing_insights(self, subject_id: &str) -> Self {
        self.with_insights_failure(subject_id, InsightsFailure::Status(502))
    }

    pub fn with_insights_failure(self, subject_id: &str, failure: InsightsFailure) -> Self {
        self.failing_insights
            .lock()
            .unwrap()
            .insert(subject_id.to_string(), failure);
        self
    }

    pub fn with_insights_latency(mut self, latency: Duration) -> Self {
        self.insights_latency = Some(latency);
        self
    }

    pub fn with_summary(self, outcome: Result<Option<String>>) -> Self {
        *self.summary.lock().unwrap() = Some(outcome);
        self
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.lock().unwrap().len()
    }

    pub fn insights_ids(&self) -> Vec<String> {
        self.insights_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn insights_times(&self) -> Vec<Instant> {
        self.insights_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait]
impl InfluencerApi for FakeInfluencerApi {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<InfluencerRecord>> {
        self.search_calls.lock().unwrap().push(query.clone());
        if let Some(status) = *self.search_status.lock().unwrap() {
            return Err(PilotError::Upstream {
                status,
                body: "search failed".to_string(),
            });
        }
        Ok(self.search_results.lock().unwrap().clone())
    }

    async fn insights(&self, subject_id: &str) -> Result<EnrichmentPayload> {
        self.insights_calls
            .lock()
            .unwrap()
            .push((subject_id.to_string(), Instant::now()));

        if let Some(latency) = self.insights_latency {
            tokio::time::sleep(latency).await;
        }

        let failure = self.failing_insights.lock().unwrap().get(subject_id).copied();
        match failure {
            Some(InsightsFailure::Status(status)) => {
                return Err(PilotError::Upstream {
                    status,
                    body: "insights failed".to_string(),
                });
            }
            Some(InsightsFailure::Transport) => {
                reqwest::get("http://127.0.0.1:1/influencers/insights").await?;
                unreachable!("nothing listens on port 1");
            }
            Some(InsightsFailure::MalformedBody) => {
                serde_json::from_str::<Value>("<html>")?;
                unreachable!("markup is not JSON");
            }
            Some(InsightsFailure::NotAnObject) => {
                return Err(PilotError::InvalidResponse(format!(
                    "insights for {subject_id} was not an object: [1,2]"
                )));
            }
            None => {}
        }

        self.insights
            .lock()
            .unwrap()
            .get(subject_id)
            .cloned()
            .ok_or_else(|| PilotError::Upstream {
                status: 404,
                body: format!("no insights for {subject_id}"),
            })
    }

    async fn summary(&self, request: &SummaryRequest) -> Result<Option<String>> {
        self.summary_calls.lock().unwrap().push(request.clone());
        match self.summary.lock().unwrap().take() {
            Some(outcome) => outcome,
            None => Ok(None),
        }
    }
}
