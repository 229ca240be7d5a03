use crate::api::require;
use crate::models::{
    ErrorResponse, IngestChannelRequest, IngestChannelResponse, IngestVideoRequest,
    IngestVideoResponse, VideoRecord,
};
use crate::services::store::SupabaseStore;
use crate::services::youtube::YouTubeClient;
use crate::utils::extract_youtube_video_id;
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{get, post, State};

/// Ingest a single video by id or by any recognizable YouTube URL:
/// one metadata lookup, one upsert keyed on (user, video).
#[post("/ingest", data = "<request>")]
pub async fn ingest_video(
    state: &State<AppState>,
    request: Json<IngestVideoRequest>,
) -> Result<Json<IngestVideoResponse>, ErrorResponse> {
    let user_id = require(&request.user_id, "Video ID and User ID are required")?;
    let raw = request
        .video_id
        .as_ref()
        .or(request.url.as_ref())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ErrorResponse::new("Video ID and User ID are required"))?;
    let video_id = extract_youtube_video_id(raw).unwrap_or_else(|| raw.to_string());

    let youtube = YouTubeClient::from_env(&state.http)?;
    let store = SupabaseStore::from_env(&state.http)?;

    info!("Fetching metadata for video: {video_id}");
    let videos = youtube
        .fetch_video_details(std::slice::from_ref(&video_id), user_id)
        .await?;
    let video = videos
        .into_iter()
        .next()
        .ok_or_else(|| ErrorResponse::new("Video not found or is private"))?;

    store.upsert_videos(std::slice::from_ref(&video)).await?;
    info!("Successfully saved video: {}", video.title);

    Ok(Json(IngestVideoResponse {
        success: true,
        title: video.title,
        video_id: video.video_id,
    }))
}

/// Ingest a channel: resolve the identifier, enumerate up to the
/// video cap through the paged search endpoint, fetch details in one
/// batched call, upsert everything.
#[post("/ingest", data = "<request>")]
pub async fn ingest_channel(
    state: &State<AppState>,
    request: Json<IngestChannelRequest>,
) -> Result<Json<IngestChannelResponse>, ErrorResponse> {
    let channel = require(&request.channel_id, "Channel ID and User ID are required")?;
    let user_id = require(&request.user_id, "Channel ID and User ID are required")?;

    let youtube = YouTubeClient::from_env(&state.http)?;
    let store = SupabaseStore::from_env(&state.http)?;

    let channel_id = youtube.resolve_channel_id(channel).await?;
    info!("Fetching videos for channel: {channel_id}");

    let video_ids = youtube.list_channel_video_ids(&channel_id).await?;
    if video_ids.is_empty() {
        return Err(ErrorResponse::new("No videos found for this channel"));
    }
    info!("Total videos found: {}", video_ids.len());

    let videos = youtube.fetch_video_details(&video_ids, user_id).await?;
    store.upsert_videos(&videos).await?;
    info!("Successfully inserted {} videos", videos.len());

    let channel_title = videos
        .first()
        .map(|video| video.channel_title.clone())
        .unwrap_or_else(|| "Unknown Channel".to_string());

    Ok(Json(IngestChannelResponse {
        success: true,
        video_count: videos.len(),
        channel_title,
    }))
}

/// The user's library, newest first, for the library panel.
#[get("/list?<user_id>")]
pub async fn list_videos(
    state: &State<AppState>,
    user_id: &str,
) -> Result<Json<Vec<VideoRecord>>, ErrorResponse> {
    let store = SupabaseStore::from_env(&state.http)?;
    let videos = store.list_videos(user_id).await?;
    info!("Found {} registered videos.", videos.len());
    Ok(Json(videos))
}
