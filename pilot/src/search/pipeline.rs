use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::memo::{InsightsMemo, InsightsOutcome};
use super::pacing::Pacer;
use crate::client::InfluencerApi;
use crate::models::InfluencerRecord;

/// Whether a search batch already carries metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every record exposes a metrics field; enrichment can be skipped.
    Enriched,
    NeedsEnrichment,
}

impl BatchStatus {
    /// All-or-nothing: a single bare record routes the whole batch through
    /// enrichment. An empty batch always needs enrichment (which is a no-op).
    pub fn of(records: &[InfluencerRecord]) -> Self {
        if !records.is_empty() && records.iter().all(InfluencerRecord::has_metrics) {
            BatchStatus::Enriched
        } else {
            BatchStatus::NeedsEnrichment
        }
    }
}

/// Counters for one enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub requested: usize,
    pub memo_hits: usize,
    pub misses: usize,
    pub merged: usize,
    pub without_id: usize,
    pub already_enriched: usize,
}

/// Sequential per-record enrichment against the insights endpoint.
///
/// Never fails: a record whose insights cannot be fetched is returned as it
/// came in. Output order and length always match the input.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    api: Arc<dyn InfluencerApi>,
    pacer: Arc<dyn Pacer>,
}

impl EnrichmentPipeline {
    pub fn new(api: Arc<dyn InfluencerApi>, pacer: Arc<dyn Pacer>) -> Self {
        Self { api, pacer }
    }

    pub async fn enrich(&self, records: Vec<InfluencerRecord>) -> Vec<InfluencerRecord> {
        self.enrich_with_stats(records).await.0
    }

    pub async fn enrich_with_stats(
        &self,
        records: Vec<InfluencerRecord>,
    ) -> (Vec<InfluencerRecord>, EnrichmentStats) {
        let mut memo = InsightsMemo::new();
        let mut stats = EnrichmentStats::default();
        let mut enriched = Vec::with_capacity(records.len());

        for mut record in records {
            let Some(subject_id) = record.subject_id() else {
                stats.without_id += 1;
                enriched.push(record);
                continue;
            };

            if record.has_metrics() {
                stats.already_enriched += 1;
                enriched.push(record);
                continue;
            }

            if memo.get(&subject_id).is_some() {
                stats.memo_hits += 1;
            } else {
                let outcome = self.fetch_insights(&subject_id, &record).await;
                stats.requested += 1;
                if outcome == InsightsOutcome::NoData {
                    stats.misses += 1;
                }
                memo.put(subject_id.clone(), outcome);
            }

            if let Some(payload) = memo.get(&subject_id).and_then(InsightsOutcome::payload) {
                record.merge(payload);
                stats.merged += 1;
            }

            enriched.push(record);
        }

        debug!(
            requested = stats.requested,
            memo_hits = stats.memo_hits,
            misses = stats.misses,
            merged = stats.merged,
            without_id = stats.without_id,
            already_enriched = stats.already_enriched,
            "Enrichment run complete"
        );

        (enriched, stats)
    }

    async fn fetch_insights(&self, subject_id: &str, record: &InfluencerRecord) -> InsightsOutcome {
        self.pacer.acquire().await;
        let result = self.api.insights(subject_id).await;
        self.pacer.release().await;

        match result {
            Ok(payload) => InsightsOutcome::Payload(payload),
            Err(e) => {
                let who = record
                    .first_of(&["username", "full_name"])
                    .map(|value| match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .unwrap_or_default();
                warn!(
                    subject_id,
                    who = %who,
                    error = %e,
                    "Failed to fetch insights, leaving record unenriched"
                );
                InsightsOutcome::NoData
            }
        }
    }
}
