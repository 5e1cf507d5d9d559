use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::record::{is_truthy, InfluencerRecord};

/// Body of `POST /summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub username: String,
    pub text: String,
    pub followers: Value,
    pub avg_likes: Value,
    pub eng_rate: Value,
    pub niches: Value,
    pub platform: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: Option<String>,
}

fn field_or(record: &InfluencerRecord, field: &str, default: Value) -> Value {
    record
        .get(field)
        .filter(|value| is_truthy(value))
        .cloned()
        .unwrap_or(default)
}

impl SummaryRequest {
    pub fn from_record(record: &InfluencerRecord, platform: &str) -> Self {
        let text = match record.get("bio") {
            Some(Value::String(bio)) => bio.clone(),
            Some(other) if is_truthy(other) => other.to_string(),
            _ => String::new(),
        };

        Self {
            username: record.username().unwrap_or_default(),
            text,
            followers: field_or(record, "followers", json!(0)),
            avg_likes: field_or(record, "avg_likes", json!(0)),
            eng_rate: field_or(record, "eng_rate", json!(0)),
            niches: field_or(record, "niches", json!([])),
            platform: platform.to_string(),
        }
    }
}
