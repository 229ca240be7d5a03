use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use std::io::Cursor;

/// One row of the `youtube_videos` table. Field names match the
/// database columns.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VideoRecord {
    pub user_id: String,
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub duration: String,
    pub published_at: String,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    pub channel_id: String,
    pub channel_title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    // Skipped when absent so re-ingesting a video overwrites metadata
    // without nulling out a transcript that already exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestVideoRequest {
    pub video_id: Option<String>,
    pub url: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestVideoResponse {
    pub success: bool,
    pub title: String,
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestChannelRequest {
    pub channel_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestChannelResponse {
    pub success: bool,
    pub video_count: usize,
    pub channel_title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRequest {
    pub video_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub success: bool,
    pub transcript: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_query: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<VideoRecord>,
    pub total_videos: usize,
    pub relevant_count: usize,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub theory: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    pub summary: String,
    pub raw_data: String,
    pub videos_analyzed: usize,
    pub batches_skipped: usize,
    pub message: String,
}

/// Uniform error body for every handler. Always a 400 with
/// `{"error": message}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            error: message.into(),
        }
    }
}

impl From<anyhow::Error> for ErrorResponse {
    fn from(error: anyhow::Error) -> Self {
        ErrorResponse {
            error: error.to_string(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self)
            .unwrap_or_else(|_| r#"{"error":"An unexpected error occurred"}"#.to_string());
        Response::build()
            .status(Status::BadRequest)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_payload_skips_absent_transcript() {
        let record = VideoRecord {
            user_id: "user-1".to_string(),
            video_id: "dQw4w9WgXcQ".to_string(),
            title: "Some video".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("transcript"));
        assert!(!object.contains_key("created_at"));
    }

    #[test]
    fn upsert_payload_keeps_present_transcript() {
        let record = VideoRecord {
            transcript: Some("hello".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["transcript"], "hello");
    }

    #[test]
    fn video_record_roundtrips_missing_optional_columns() {
        let row = serde_json::json!({
            "user_id": "user-1",
            "video_id": "abc12345678",
            "title": "t",
            "description": "",
            "thumbnail_url": null,
            "duration": "PT4M13S",
            "published_at": "2024-01-01T00:00:00Z",
            "channel_id": "UCx",
            "channel_title": "c",
        });

        let record: VideoRecord = serde_json::from_value(row).unwrap();
        assert_eq!(record.view_count, 0);
        assert!(record.tags.is_empty());
        assert!(record.transcript.is_none());
    }
}
