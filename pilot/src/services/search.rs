use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::client::{HttpInfluencerApi, InfluencerApi};
use crate::config::{Config, SearchConfig};
use crate::error::{PilotError, Result};
use crate::models::{InfluencerRecord, SearchQuery};
use crate::search::{BatchStatus, EnrichmentPipeline, FixedDelayPacer, Pacer, ResultCache};

/// What a completed search hands to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub records: Vec<InfluencerRecord>,
    /// True when served from the single-slot cache without a network call.
    pub from_cache: bool,
    pub fetched_at: DateTime<Utc>,
    pub generation: u64,
}

/// Top-level search orchestration: normalize, consult the cache, fetch,
/// enrich when needed, commit.
///
/// Clones share the cache slot, the generation counter and the pacer, so a
/// clone handed to another task still observes newer searches.
#[derive(Clone)]
pub struct SearchService {
    api: Arc<dyn InfluencerApi>,
    pipeline: EnrichmentPipeline,
    cache: ResultCache,
    generation: Arc<AtomicU64>,
    max_limit: u32,
}

impl SearchService {
    pub fn new(api: Arc<dyn InfluencerApi>, pacer: Arc<dyn Pacer>, config: &SearchConfig) -> Self {
        Self {
            pipeline: EnrichmentPipeline::new(api.clone(), pacer),
            api,
            cache: ResultCache::new(),
            generation: Arc::new(AtomicU64::new(0)),
            max_limit: config.max_limit,
        }
    }

    /// HTTP client plus fixed-delay pacing, both taken from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api: Arc<dyn InfluencerApi> = Arc::new(HttpInfluencerApi::new(&config.api)?);
        let pacer = Arc::new(FixedDelayPacer::from_millis(
            config.search.insights_pacing_ms,
        ));
        Ok(Self::new(api, pacer, &config.search))
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn api(&self) -> Arc<dyn InfluencerApi> {
        self.api.clone()
    }

    /// Generation of the most recently started search.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn search(&self, query: SearchQuery) -> Result<SearchResults> {
        let query = query.normalize(self.max_limit)?;
        let key = query.cache_key();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(entry) = self.cache.lookup(&key) {
            tracing::info!(
                key = %key,
                count = entry.records.len(),
                "Serving search from cache"
            );
            return Ok(SearchResults {
                records: entry.records,
                from_cache: true,
                fetched_at: entry.fetched_at,
                generation,
            });
        }

        let start = Instant::now();
        let records = self.api.search(&query).await?;

        let records = match BatchStatus::of(&records) {
            BatchStatus::Enriched => {
                tracing::debug!(
                    count = records.len(),
                    "Search results already carry metrics, skipping enrichment"
                );
                records
            }
            BatchStatus::NeedsEnrichment => self.pipeline.enrich(records).await,
        };

        let latest = self.current_generation();
        if latest != generation {
            tracing::info!(
                generation,
                latest,
                key = %key,
                "Discarding results of a superseded search"
            );
            return Err(PilotError::Superseded { generation });
        }

        let fetched_at = self.cache.store(key.clone(), records.clone());
        tracing::info!(
            key = %key,
            count = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );

        Ok(SearchResults {
            records,
            from_cache: false,
            fetched_at,
            generation,
        })
    }
}
