use crate::api::require;
use crate::models::{ChatRequest, ChatResponse, ErrorResponse};
use crate::services::chat::{respond, CHAT_CONTEXT_LIMIT};
use crate::services::openai::OpenAiClient;
use crate::services::store::SupabaseStore;
use crate::AppState;
use log::{error, info};
use rocket::serde::json::Json;
use rocket::{post, State};

/// One stateless chat turn over the user's recent library context.
#[post("/", data = "<request>")]
pub async fn chat_turn(
    state: &State<AppState>,
    request: Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ErrorResponse> {
    let message = require(&request.message, "Message and User ID are required")?;
    let user_id = require(&request.user_id, "Message and User ID are required")?;

    info!("Processing AI chat request for user: {user_id}");

    let model = OpenAiClient::from_env(&state.http)?;
    let store = SupabaseStore::from_env(&state.http)?;

    // A failed context load degrades to an empty context; the chat
    // turn itself still runs.
    let videos = match store.recent_videos(user_id, CHAT_CONTEXT_LIMIT).await {
        Ok(videos) => videos,
        Err(e) => {
            error!("Error fetching videos: {e:?}");
            Vec::new()
        }
    };

    let response = respond(&model, message, &videos).await?;
    info!("AI response generated successfully");

    Ok(Json(ChatResponse {
        success: true,
        response,
    }))
}
