pub mod config;
pub mod error;
pub mod sentiment;
pub mod server;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of characters of comment text returned to callers
pub const MAX_TEXT_CHARS: usize = 500;

/// Default number of comments requested when the body omits `limit`
pub const DEFAULT_LIMIT: i64 = 100;

/// Polarity category of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Body of `POST /analyze_comments/`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Accepts any JSON integer or integral float, saturating at the i64 range.
/// The fetcher clamps the result to the per-request maximum.
fn deserialize_limit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(v) = number.as_i64() {
        return Ok(v);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        // float-to-int casts saturate
        Some(f) if f.fract() == 0.0 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("limit must be an integer, got {number}"))),
    }
}

/// A single classified top-level comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentResult {
    pub comment_id: String,
    pub text: String,
    pub sentiment: Sentiment,
    pub polarity: f64,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
        }
    }
}

// Order matters: the first pattern that matches wins.
static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:v=|/)([0-9A-Za-z_-]{11})",
        r"embed/([0-9A-Za-z_-]{11})",
        r"shorts/([0-9A-Za-z_-]{11})",
        r"^([0-9A-Za-z_-]{11})$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("video id pattern is valid"))
    .collect()
});

/// Extract the 11-character video ID from a YouTube URL or a bare ID.
///
/// Input is matched as given; surrounding whitespace is not stripped.
pub fn extract_video_id(input: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(input))
        .map(|caps| caps[1].to_string())
}

/// Truncate to at most `max` characters without splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
