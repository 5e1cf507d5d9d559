use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_or(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
        _ => default.to_string(),
    }
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:8006";
pub const DEFAULT_SEARCH_PATH: &str = "/influencers/search/top";
pub const DEFAULT_INSIGHTS_PATH: &str = "/influencers/insights";
pub const DEFAULT_SUMMARY_PATH: &str = "/influencers/summary";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub summary: SummaryConfig,
}

/// Where the upstream services live and how long to wait for them.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub search_path: String,
    pub insights_path: String,
    pub summary_path: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub default_limit: u32,
    pub max_limit: u32,
    /// Minimum spacing between two outbound insights requests.
    pub insights_pacing_ms: u64,
}

#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub platform: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            insights_path: DEFAULT_INSIGHTS_PATH.to_string(),
            summary_path: DEFAULT_SUMMARY_PATH.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            max_limit: 50,
            insights_pacing_ms: 1200,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            platform: "Instagram".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let api_defaults = ApiConfig::default();
        let search_defaults = SearchConfig::default();

        let max_limit = parse_env_or("PILOT_MAX_LIMIT", search_defaults.max_limit).max(1);
        let default_limit =
            parse_env_or("PILOT_DEFAULT_LIMIT", search_defaults.default_limit).clamp(1, max_limit);

        Self {
            api: ApiConfig {
                base_url: env_or("PILOT_API_BASE_URL", &api_defaults.base_url)
                    .trim_end_matches('/')
                    .to_string(),
                search_path: env_or("PILOT_SEARCH_PATH", &api_defaults.search_path),
                insights_path: env_or("PILOT_INSIGHTS_PATH", &api_defaults.insights_path),
                summary_path: env_or("PILOT_SUMMARY_PATH", &api_defaults.summary_path),
                timeout_secs: parse_env_or("PILOT_HTTP_TIMEOUT_SECS", api_defaults.timeout_secs),
            },
            search: SearchConfig {
                default_limit,
                max_limit,
                insights_pacing_ms: parse_env_or(
                    "PILOT_INSIGHTS_PACING_MS",
                    search_defaults.insights_pacing_ms,
                ),
            },
            summary: SummaryConfig {
                platform: env_or("PILOT_PLATFORM", &SummaryConfig::default().platform),
            },
        }
    }
}
