use crate::api::require;
use crate::models::{ErrorResponse, SearchRequest, SearchResponse};
use crate::services::openai::OpenAiClient;
use crate::services::search::rank_library;
use crate::services::store::SupabaseStore;
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{post, State};

/// AI-ranked search over the user's whole library, by metadata only.
#[post("/", data = "<request>")]
pub async fn search_library(
    state: &State<AppState>,
    request: Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ErrorResponse> {
    let query = require(&request.search_query, "Search query and User ID are required")?;
    let user_id = require(&request.user_id, "Search query and User ID are required")?;

    info!("Processing AI video search for user: {user_id}, query: {query}");

    let model = OpenAiClient::from_env(&state.http)?;
    let store = SupabaseStore::from_env(&state.http)?;

    let videos = store
        .list_videos(user_id)
        .await
        .map_err(|_| ErrorResponse::new("Failed to fetch videos"))?;

    if videos.is_empty() {
        return Ok(Json(SearchResponse {
            success: true,
            results: Vec::new(),
            total_videos: 0,
            relevant_count: 0,
            message: "No videos found in your library".to_string(),
        }));
    }

    info!("Found {} videos, analyzing with AI...", videos.len());

    let results = rank_library(&model, query, &videos).await?;
    info!("AI found {} relevant videos", results.len());

    let message = format!("Found {} videos matching your search", results.len());
    Ok(Json(SearchResponse {
        success: true,
        total_videos: videos.len(),
        relevant_count: results.len(),
        results,
        message,
    }))
}
