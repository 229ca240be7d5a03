use crate::api::require;
use crate::models::{ErrorResponse, TranscriptRequest, TranscriptResponse};
use crate::services::openai::{ChatModel, OpenAiClient};
use crate::services::store::SupabaseStore;
use crate::services::transcript::{existing_transcript, synthesis_request};
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{post, State};

/// Generate (or return the stored) transcript for one owned video.
/// An existing transcript is returned unchanged with no model call.
#[post("/generate", data = "<request>")]
pub async fn generate_transcript(
    state: &State<AppState>,
    request: Json<TranscriptRequest>,
) -> Result<Json<TranscriptResponse>, ErrorResponse> {
    let video_id = require(&request.video_id, "Video ID and User ID are required")?;
    let user_id = require(&request.user_id, "Video ID and User ID are required")?;

    let store = SupabaseStore::from_env(&state.http)?;

    info!("Processing transcription request for video: {video_id}");
    let video = store
        .find_video(user_id, video_id)
        .await?
        .ok_or_else(|| ErrorResponse::new("Video not found or access denied"))?;

    if let Some(transcript) = existing_transcript(&video) {
        return Ok(Json(TranscriptResponse {
            success: true,
            transcript: transcript.to_string(),
            message: "Transcript already exists".to_string(),
        }));
    }

    let model = OpenAiClient::from_env(&state.http)?;
    let transcript = model.complete(&synthesis_request(&video)).await?;

    store.set_transcript(user_id, video_id, &transcript).await?;
    info!("Transcript generated and saved successfully");

    Ok(Json(TranscriptResponse {
        success: true,
        transcript,
        message: "Transcript generated successfully".to_string(),
    }))
}
