use serde::{Deserialize, Serialize};

/// A stored video row as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// A chat message lives only in the current session's message list.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: usize,
    pub content: String,
    pub role: ChatRole,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// One analysis run's output; replaced by the next run, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub summary: String,
    pub raw_data: String,
    pub videos_analyzed: usize,
    pub batches_skipped: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestVideoResponse {
    pub success: bool,
    pub title: String,
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestChannelResponse {
    pub success: bool,
    pub video_count: usize,
    pub channel_title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub success: bool,
    pub transcript: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    pub summary: String,
    pub raw_data: String,
    pub videos_analyzed: usize,
    pub batches_skipped: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<VideoRecord>,
    #[serde(default)]
    pub total_videos: usize,
    #[serde(default)]
    pub relevant_count: usize,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
