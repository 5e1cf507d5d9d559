use std::collections::HashMap;

use crate::models::EnrichmentPayload;

/// Result of asking the insights endpoint about one subject.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightsOutcome {
    Payload(EnrichmentPayload),
    /// The call failed or returned a non-success status.
    NoData,
}

impl InsightsOutcome {
    pub fn payload(&self) -> Option<&EnrichmentPayload> {
        match self {
            InsightsOutcome::Payload(payload) => Some(payload),
            InsightsOutcome::NoData => None,
        }
    }
}

/// Per-run memo from subject identifier to insights outcome.
///
/// Created fresh for each enrichment run and dropped when it ends.
#[derive(Debug, Default)]
pub struct InsightsMemo {
    entries: HashMap<String, InsightsOutcome>,
}

impl InsightsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, subject_id: &str) -> Option<&InsightsOutcome> {
        self.entries.get(subject_id)
    }

    pub fn put(&mut self, subject_id: impl Into<String>, outcome: InsightsOutcome) {
        self.entries.insert(subject_id.into(), outcome);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_absent() {
        let memo = InsightsMemo::new();
        assert!(memo.get("1").is_none());
        assert!(memo.is_empty());
    }

    #[test]
    fn test_put_and_get_payload() {
        let mut memo = InsightsMemo::new();
        let fields = json!({"avg_likes": 10}).as_object().cloned().unwrap();
        let payload = EnrichmentPayload::new(fields);
        memo.put("1", InsightsOutcome::Payload(payload.clone()));

        assert_eq!(memo.get("1").and_then(InsightsOutcome::payload), Some(&payload));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_no_data_marker_is_a_hit() {
        let mut memo = InsightsMemo::new();
        memo.put("2", InsightsOutcome::NoData);

        assert_eq!(memo.get("2"), Some(&InsightsOutcome::NoData));
        assert!(memo.get("2").and_then(InsightsOutcome::payload).is_none());
    }
}
