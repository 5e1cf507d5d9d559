use thiserror::Error;

#[derive(Error, Debug)]
pub enum PilotError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search superseded by a newer request (generation {generation})")]
    Superseded { generation: u64 },
}

impl PilotError {
    /// HTTP status carried by an upstream failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            PilotError::Upstream { status, .. } => Some(*status),
            PilotError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for showing to the person who ran the search.
    pub fn user_message(&self) -> String {
        match self {
            PilotError::Upstream { status, .. } => format!("API error: {status}"),
            PilotError::Network(_) => "Could not reach the search service".to_string(),
            PilotError::Validation(msg) => msg.clone(),
            PilotError::Superseded { .. } => "A newer search replaced this one".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PilotError>;
