#![allow(dead_code)]

use std::sync::Once;

use serde_json::{json, Value};

use pilot::config::{ApiConfig, SearchConfig};
use pilot::models::InfluencerRecord;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn api_config(base_url: String) -> ApiConfig {
    ApiConfig {
        base_url,
        timeout_secs: 5,
        ..ApiConfig::default()
    }
}

pub fn search_config(pacing_ms: u64) -> SearchConfig {
    SearchConfig {
        insights_pacing_ms: pacing_ms,
        ..SearchConfig::default()
    }
}

pub fn record(value: Value) -> InfluencerRecord {
    InfluencerRecord::try_from(value).expect("fixture record must be an object")
}

/// Five bare search hits as returned for "fashion hyderabad".
pub fn fashion_hyderabad_results() -> Value {
    json!({
        "results": [
            {"pk": 101, "username": "hyd_style", "full_name": "Hyd Style", "followers": "120K"},
            {
                "pk": 102,
                "username": "deccan_drapes",
                "full_name": "Deccan Drapes",
                "followers": "1.2M"
            },
            {"pk": 103, "username": "charminar_chic", "followers": 45000},
            {"pk": 104, "username": "pearl_city_looks", "followers": "980"},
            {"pk": 105, "username": "jubilee_threads", "followers": "2.5K"}
        ],
        "cached": false
    })
}

pub use serial_test::serial;
pub use wiremock;
