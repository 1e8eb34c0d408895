use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{AnalyzeError, Result};
use crate::sentiment::SentimentClassifier;
use crate::{CommentResult, MAX_TEXT_CHARS, truncate_chars};

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Hard cap on comments returned for a single request
pub const MAX_TOTAL_COMMENTS: usize = 500;

/// Largest page the commentThreads endpoint will serve
pub const MAX_PAGE_SIZE: usize = 100;

/// One page of a `commentThreads.list` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPage {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub id: String,
    pub snippet: ThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "textDisplay", default)]
    pub text_display: String,
}

impl CommentThread {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            snippet: ThreadSnippet {
                top_level_comment: TopLevelComment {
                    snippet: CommentSnippet {
                        text_display: text.into(),
                    },
                },
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.snippet.top_level_comment.snippet.text_display
    }
}

/// Paged access to top-level comment threads (allows mocking)
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn list_comment_threads(
        &self,
        video_id: &str,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<CommentPage>;
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}

/// YouTube Data API v3 client for the commentThreads endpoint
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    /// Build a client, rejecting keys that cannot possibly be valid
    pub fn new(api_key: &str, base_url: Option<&str>) -> Result<Self> {
        if api_key.is_empty() {
            return Err(AnalyzeError::Configuration("YouTube API key is empty".to_string()));
        }
        if api_key.chars().any(char::is_whitespace) {
            return Err(AnalyzeError::Configuration(
                "YouTube API key contains whitespace".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AnalyzeError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url
                .unwrap_or(DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn list_comment_threads(
        &self,
        video_id: &str,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<CommentPage> {
        let url = format!("{}/commentThreads", self.base_url);
        let max_results = max_results.to_string();

        let mut query = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
            ("order", "relevance"),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        debug!("Requesting commentThreads: video={video_id} maxResults={max_results} pageToken={page_token:?}");

        let resp = self.client.get(&url).query(&query).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalyzeError::Upstream(upstream_error_text(status, &body)));
        }

        Ok(resp.json().await?)
    }
}

fn upstream_error_text(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(envelope) => format!("YouTube API returned {status}: {}", envelope.error.message),
        Err(_) if body.trim().is_empty() => format!("YouTube API returned {status}"),
        Err(_) => format!("YouTube API returned {status}: {}", body.trim()),
    }
}

/// Number of comments actually fetched for a requested limit
pub fn clamp_limit(requested: i64) -> usize {
    requested.clamp(0, MAX_TOTAL_COMMENTS as i64) as usize
}

/// Pages through comment threads and classifies each comment
pub struct CommentFetcher {
    source: Arc<dyn CommentSource>,
    classifier: Arc<SentimentClassifier>,
}

impl CommentFetcher {
    pub fn new(source: Arc<dyn CommentSource>, classifier: Arc<SentimentClassifier>) -> Self {
        Self { source, classifier }
    }

    /// Fetch up to `min(requested, 500)` classified comments in relevance order.
    ///
    /// Any failed page aborts the whole fetch; comments gathered before the
    /// failure are dropped.
    pub async fn fetch(&self, video_id: &str, requested: i64) -> Result<Vec<CommentResult>> {
        let target = clamp_limit(requested);
        let mut comments: Vec<CommentResult> = Vec::with_capacity(target);
        let mut page_token: Option<String> = None;

        while comments.len() < target {
            let page_size = MAX_PAGE_SIZE.min(target - comments.len());
            let page = self
                .source
                .list_comment_threads(video_id, page_size, page_token.as_deref())
                .await
                .inspect_err(|e| warn!("commentThreads failed for {video_id}: {e}"))?;

            debug!(
                "Fetched {} comment threads for {video_id} (has next page: {})",
                page.items.len(),
                page.next_page_token.is_some()
            );

            for thread in page.items.iter().take(target - comments.len()) {
                comments.push(self.classify(thread));
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        if comments.is_empty() {
            return Err(AnalyzeError::NoComments);
        }
        Ok(comments)
    }

    fn classify(&self, thread: &CommentThread) -> CommentResult {
        let text = thread.text();
        let (sentiment, polarity) = self.classifier.classify(text);
        CommentResult {
            comment_id: thread.id.clone(),
            text: truncate_chars(text, MAX_TEXT_CHARS).to_string(),
            sentiment,
            polarity,
        }
    }
}
