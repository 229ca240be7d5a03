use crate::api::require;
use crate::models::{AnalysisRequest, AnalysisResponse, ErrorResponse};
use crate::services::analysis::{analyze_library, TranscriptVideo};
use crate::services::openai::OpenAiClient;
use crate::services::store::SupabaseStore;
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{post, State};

/// Run the two-pass transcript analysis over every transcript-bearing
/// video the user owns.
#[post("/", data = "<request>")]
pub async fn analyze_theory(
    state: &State<AppState>,
    request: Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ErrorResponse> {
    let theory = require(&request.theory, "Theory query and User ID are required")?;
    let user_id = require(&request.user_id, "Theory query and User ID are required")?;

    info!("Processing theory query: {theory} for user: {user_id}");

    let model = OpenAiClient::from_env(&state.http)?;
    let store = SupabaseStore::from_env(&state.http)?;

    let videos = store
        .videos_with_transcripts(user_id)
        .await
        .map_err(|_| ErrorResponse::new("Failed to fetch videos"))?;

    let sources: Vec<TranscriptVideo> = videos.iter().filter_map(TranscriptVideo::from_record).collect();
    if sources.is_empty() {
        return Err(ErrorResponse::new("No videos with transcripts found"));
    }
    info!("Found {} videos with transcripts", sources.len());

    let report = analyze_library(&model, theory, &sources).await?;
    info!("Theory analysis complete");

    let message = if report.raw_data.is_empty() {
        "Analysis complete - no relevant content found".to_string()
    } else {
        "Theory analysis completed successfully".to_string()
    };

    Ok(Json(AnalysisResponse {
        success: true,
        summary: report.summary,
        raw_data: report.raw_data,
        videos_analyzed: report.videos_analyzed,
        batches_skipped: report.batches_skipped,
        message,
    }))
}
