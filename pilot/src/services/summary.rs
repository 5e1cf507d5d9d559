use std::sync::Arc;

use crate::client::InfluencerApi;
use crate::config::SummaryConfig;
use crate::error::Result;
use crate::models::{InfluencerRecord, SummaryRequest};

/// Shown when the summary request fails for any reason.
pub const SUMMARY_FALLBACK: &str = "Failed to generate summary. Please try again.";

/// Shown when the service answers successfully but with nothing to say.
pub const SUMMARY_EMPTY: &str = "No summary available";

/// On-demand AI summary for a single influencer record.
#[derive(Clone)]
pub struct SummaryService {
    api: Arc<dyn InfluencerApi>,
    platform: String,
}

impl SummaryService {
    pub fn new(api: Arc<dyn InfluencerApi>, config: &SummaryConfig) -> Self {
        Self {
            api,
            platform: config.platform.clone(),
        }
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn request_for(&self, record: &InfluencerRecord) -> SummaryRequest {
        SummaryRequest::from_record(record, &self.platform)
    }

    /// Raw outcome: `Ok(None)` when the service had no summary text.
    pub async fn try_generate(&self, record: &InfluencerRecord) -> Result<Option<String>> {
        let request = self.request_for(record);
        tracing::debug!(username = %request.username, "Requesting summary");
        self.api.summary(&request).await
    }

    /// Always yields displayable text.
    pub async fn generate(&self, record: &InfluencerRecord) -> String {
        match self.try_generate(record).await {
            Ok(Some(summary)) => summary,
            Ok(None) => SUMMARY_EMPTY.to_string(),
            Err(e) => {
                tracing::error!(
                    username = record.username().unwrap_or_default(),
                    error = %e,
                    "Summary generation failed"
                );
                SUMMARY_FALLBACK.to_string()
            }
        }
    }
}
