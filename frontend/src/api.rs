use crate::env_config::BACKEND_URL;
use crate::models::{
    AnalysisResponse, ChatResponse, ErrorResponse, IngestChannelResponse, IngestVideoResponse,
    SearchResponse, TranscriptResponse, VideoRecord,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {e}"))
    } else {
        let status = response.status();
        match response.text().await {
            // The backend replies with a structured `{error}` body;
            // fall back to the raw text when it doesn't.
            Ok(text) => match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(error_response) => Err(error_response.error),
                Err(_) => Err(format!("Request failed ({status}): {text}")),
            },
            Err(_) => Err(format!("Request failed with status: {status}")),
        }
    }
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let url = format!("{}{path}", &*BACKEND_URL);
    let response = Request::post(&url)
        .json(body)
        .map_err(|e| format!("Failed to encode request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;
    parse_response(response).await
}

pub async fn fetch_library(user_id: &str) -> Result<Vec<VideoRecord>, String> {
    let url = format!(
        "{}/video/list?user_id={}",
        &*BACKEND_URL,
        urlencoding::encode(user_id)
    );
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;
    parse_response(response).await
}

pub async fn ingest_video(user_id: &str, url: &str) -> Result<IngestVideoResponse, String> {
    post_json("/video/ingest", &json!({ "url": url, "userId": user_id })).await
}

pub async fn ingest_channel(
    user_id: &str,
    channel_id: &str,
) -> Result<IngestChannelResponse, String> {
    post_json(
        "/channel/ingest",
        &json!({ "channelId": channel_id, "userId": user_id }),
    )
    .await
}

pub async fn generate_transcript(
    user_id: &str,
    video_id: &str,
) -> Result<TranscriptResponse, String> {
    post_json(
        "/transcript/generate",
        &json!({ "videoId": video_id, "userId": user_id }),
    )
    .await
}

pub async fn search_library(user_id: &str, query: &str) -> Result<SearchResponse, String> {
    post_json("/search", &json!({ "searchQuery": query, "userId": user_id })).await
}

pub async fn send_chat(user_id: &str, message: &str) -> Result<ChatResponse, String> {
    post_json("/chat", &json!({ "message": message, "userId": user_id })).await
}

pub async fn analyze_theory(user_id: &str, theory: &str) -> Result<AnalysisResponse, String> {
    post_json("/analysis", &json!({ "theory": theory, "userId": user_id })).await
}
