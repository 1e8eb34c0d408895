//! Error types for comment analysis

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("{0}")]
    Configuration(String),

    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("No comments found")]
    NoComments,

    #[error("{0}")]
    Upstream(String),
}

impl AnalyzeError {
    /// Error reported when no comment source could be constructed at startup
    pub fn not_initialized() -> Self {
        AnalyzeError::Configuration("YouTube API not initialized".to_string())
    }
}

impl From<reqwest::Error> for AnalyzeError {
    fn from(e: reqwest::Error) -> Self {
        AnalyzeError::Upstream(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(AnalyzeError::InvalidUrl.to_string(), "Invalid YouTube URL");
        assert_eq!(AnalyzeError::NoComments.to_string(), "No comments found");
        assert_eq!(AnalyzeError::not_initialized().to_string(), "YouTube API not initialized");
        assert_eq!(
            AnalyzeError::Upstream("quotaExceeded".to_string()).to_string(),
            "quotaExceeded"
        );
    }
}
