use serde::{Deserialize, Serialize};

use crate::error::{PilotError, Result};

/// Separator between the normalized keyword and the limit in a [`CacheKey`].
pub const CACHE_KEY_SEPARATOR: char = '|';

/// A user's search as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keyword: String,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, limit: u32) -> Self {
        Self {
            keyword: keyword.into(),
            limit,
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Trim the keyword, clamp the limit into `1..=max_limit`, drop a blank
    /// user id. The keyword keeps its original casing for the request.
    pub fn normalize(&self, max_limit: u32) -> Result<Self> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(PilotError::Validation("keyword is required".to_string()));
        }

        let limit = self.limit.clamp(1, max_limit.max(1));
        if limit != self.limit {
            tracing::debug!(requested = self.limit, limit, "Search limit clamped");
        }

        Ok(Self {
            keyword: keyword.to_string(),
            limit,
            user_id: self
                .user_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        })
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(&self.keyword, self.limit)
    }
}

/// `lowercase(trim(keyword)) | limit`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(keyword: &str, limit: u32) -> Self {
        Self(format!(
            "{}{}{}",
            keyword.trim().to_lowercase(),
            CACHE_KEY_SEPARATOR,
            limit
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
