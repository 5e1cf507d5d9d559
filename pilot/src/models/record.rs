use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::sanitize_image_url;

/// Fields whose presence marks a record as already carrying metrics.
pub const METRIC_FIELDS: [&str; 3] = ["post_count", "avg_likes", "total_posts"];

/// A single influencer profile as returned by the search endpoint.
///
/// The backend does not guarantee a schema, so the record is kept as a
/// JSON object and read through typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InfluencerRecord(Map<String, Value>);

/// Extra fields from the insights endpoint for one subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrichmentPayload(Map<String, Value>);

/// JavaScript-style truthiness, which is how the backend's optional fields
/// are meant to be read.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl InfluencerRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// First truthy value among `names`.
    pub fn first_of(&self, names: &[&str]) -> Option<&Value> {
        names
            .iter()
            .filter_map(|name| self.0.get(*name))
            .find(|value| is_truthy(value))
    }

    /// Enrichment join key: `pk`, falling back to `id`.
    pub fn subject_id(&self) -> Option<String> {
        self.first_of(&["pk", "id"])
            .and_then(value_to_text)
            .filter(|id| !id.trim().is_empty())
    }

    /// True when any recognized metrics field is present and non-null.
    pub fn has_metrics(&self) -> bool {
        METRIC_FIELDS
            .iter()
            .any(|field| self.0.get(*field).is_some_and(|value| !value.is_null()))
    }

    /// Merge payload fields into this record; payload values win.
    pub fn merge(&mut self, payload: &EnrichmentPayload) {
        for (key, value) in payload.fields() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn username(&self) -> Option<String> {
        self.first_of(&["username", "handle"]).and_then(value_to_text)
    }

    pub fn display_name(&self) -> String {
        self.first_of(&["full_name", "name", "username", "handle"])
            .and_then(value_to_text)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "User".to_string())
    }

    /// Up to two upper-cased initials from the display name.
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn profile_url(&self) -> Option<String> {
        self.username()
            .map(|username| format!("https://instagram.com/{username}"))
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.first_of(&["profile_pic", "avatar"])
            .and_then(sanitize_image_url)
    }

    /// First `max` niche labels from `niches` (array or comma list) or `category`.
    pub fn niche_tags(&self, max: usize) -> Vec<String> {
        let Some(source) = self.first_of(&["niches", "category"]) else {
            return Vec::new();
        };

        let tags: Vec<String> = match source {
            Value::Array(items) => items.iter().filter_map(value_to_text).collect(),
            other => value_to_text(other)
                .map(|text| text.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
        };

        tags.into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .take(max)
            .collect()
    }
}

impl From<Map<String, Value>> for InfluencerRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for InfluencerRecord {
    type Error = Value;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}

impl EnrichmentPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for EnrichmentPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
