pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod search;
pub mod services;

pub use client::{HttpInfluencerApi, InfluencerApi};
pub use config::Config;
pub use error::{PilotError, Result};
pub use models::{InfluencerRecord, SearchQuery};
pub use services::{SearchResults, SearchService, SummaryService};
