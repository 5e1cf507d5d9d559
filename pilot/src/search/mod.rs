mod cache;
mod memo;
mod pacing;
mod pipeline;

pub use cache::{CacheEntry, ResultCache};
pub use memo::{InsightsMemo, InsightsOutcome};
pub use pacing::{FixedDelayPacer, NoPacing, Pacer};
pub use pipeline::{BatchStatus, EnrichmentPipeline, EnrichmentStats};
