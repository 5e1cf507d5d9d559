//! Display helpers for the loosely-typed numeric fields the backend returns.
//!
//! Follower counts arrive as numbers, plain strings (`"2,300"`) or already
//! abbreviated strings (`"1.2M"`). [`format_magnitude`] renders them for
//! display and [`parse_follower_count`] maps them back to comparable values
//! so lists can be ordered by real magnitude.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::models::InfluencerRecord;

/// Rendered in place of a missing value.
pub const PLACEHOLDER: &str = "-";

fn follower_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([\d.]+)\s*([kKmMbB])?$").expect("follower count pattern is valid")
    })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn passthrough(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// en-US grouping with at most three fraction digits: `1234.5 -> "1,234.5"`.
fn group_number(n: f64) -> String {
    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if n < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Abbreviate a count: `1_200_000 -> "1.20M"`, `1_500 -> "1.5K"`.
pub fn format_magnitude(value: &Value) -> String {
    if is_blank(value) {
        return PLACEHOLDER.to_string();
    }
    let Some(n) = as_number(value) else {
        return passthrough(value);
    };

    if n >= 1_000_000_000.0 {
        format!("{:.2}B", n / 1_000_000_000.0)
    } else if n >= 1_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        group_number(n)
    }
}

pub fn format_percent(value: &Value) -> String {
    if is_blank(value) {
        return PLACEHOLDER.to_string();
    }
    match as_number(value) {
        Some(n) => format!("{n:.2}%"),
        None => passthrough(value),
    }
}

/// Inverse of [`format_magnitude`], lossy. Unparseable input counts as 0.
pub fn parse_follower_count(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_count_text(s),
        _ => 0.0,
    }
}

fn parse_count_text(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }

    let Some(caps) = follower_pattern().captures(cleaned) else {
        return cleaned
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0);
    };

    let Ok(base) = caps[1].parse::<f64>() else {
        return 0.0;
    };
    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("k" | "K") => 1_000.0,
        Some("m" | "M") => 1_000_000.0,
        Some("b" | "B") => 1_000_000_000.0,
        _ => 1.0,
    };

    (base * multiplier).round()
}

/// Trim, strip wrapping quotes, and upgrade `http://` to `https://`.
pub fn sanitize_image_url(value: &Value) -> Option<String> {
    let raw = match value {
        Value::Null | Value::Bool(false) => return None,
        Value::String(s) if s.is_empty() => return None,
        Value::Number(n) if n.as_f64() == Some(0.0) => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let stripped = raw.trim().trim_matches('"').trim_matches('\'');
    if stripped.is_empty() {
        return None;
    }

    Some(match stripped.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => stripped.to_string(),
    })
}

/// Stable sort, largest follower count first.
pub fn sort_by_followers_desc(records: &[InfluencerRecord]) -> Vec<InfluencerRecord> {
    let followers = |record: &InfluencerRecord| {
        parse_follower_count(record.get("followers").unwrap_or(&Value::Null))
    };

    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        followers(b)
            .partial_cmp(&followers(a))
            .unwrap_or(Ordering::Equal)
    });
    sorted
}
