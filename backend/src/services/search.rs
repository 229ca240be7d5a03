use crate::models::VideoRecord;
use crate::services::openai::{ChatModel, CompletionRequest};
use anyhow::{Context, Result};

const SEARCH_TEMPERATURE: f32 = 0.3;
const SEARCH_MAX_TOKENS: u32 = 1000;

// Long descriptions are cut down before they reach the prompt.
const DESCRIPTION_SNIPPET_CHARS: usize = 500;

/// Rank the user's library against a free-text search query. The model
/// sees metadata only (never transcripts) and replies with a JSON array
/// of video ids, most relevant first; ids it invents are dropped.
pub async fn rank_library(
    model: &dyn ChatModel,
    query: &str,
    videos: &[VideoRecord],
) -> Result<Vec<VideoRecord>> {
    let reply = model.complete(&ranking_request(query, videos)).await?;
    let ids: Vec<String> = serde_json::from_str(reply.trim())
        .context("Search ranking was not a JSON array of video ids")?;

    Ok(ids
        .iter()
        .filter_map(|id| videos.iter().find(|video| &video.video_id == id))
        .cloned()
        .collect())
}

fn ranking_request(query: &str, videos: &[VideoRecord]) -> CompletionRequest {
    let system = "You are an expert at analyzing YouTube video metadata to find videos that \
                  match user search queries. \n\n\
                  Analyze the provided video metadata and return the video IDs that are most \
                  relevant to the user's search query, ranked by relevance.\n\n\
                  Return your response as a JSON array of video IDs in order of relevance (most \
                  relevant first). Only include videos that have some relevance to the search \
                  query. If no videos match, return an empty array.\n\n\
                  Example response format:\n\
                  [\"video_id_1\", \"video_id_2\", \"video_id_3\"]"
        .to_string();

    let metadata = videos
        .iter()
        .map(video_metadata)
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        "Search query: \"{query}\"\n\n\
         Video metadata:\n\
         {metadata}\n\n\
         Please return the video IDs that match this search query, ranked by relevance."
    );

    CompletionRequest {
        system,
        user,
        temperature: SEARCH_TEMPERATURE,
        max_tokens: SEARCH_MAX_TOKENS,
    }
}

fn video_metadata(video: &VideoRecord) -> String {
    let description: String = video
        .description
        .chars()
        .take(DESCRIPTION_SNIPPET_CHARS)
        .collect();

    format!(
        "Video ID: {}\n\
         Title: {}\n\
         Channel: {}\n\
         Description: {}\n\
         Tags: {}\n\
         Views: {}\n\
         Published: {}\n\
         ---",
        video.video_id,
        video.title,
        video.channel_title,
        description,
        video.tags.join(", "),
        video.view_count,
        video.published_at
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct ScriptedModel(&'static str);

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn video(id: &str, title: &str) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            title: title.to_string(),
            channel_title: "Channel".to_string(),
            tags: vec!["rust".to_string(), "wasm".to_string()],
            view_count: 1234,
            published_at: "2024-01-01T00:00:00Z".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn results_follow_model_order_and_drop_unknown_ids() {
        let videos = [video("aaa", "first"), video("bbb", "second"), video("ccc", "third")];
        let model = ScriptedModel(r#"["ccc", "aaa", "zzz"]"#);

        let results = rank_library(&model, "anything", &videos).await.unwrap();
        let titles: Vec<&str> = results.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["third", "first"]);
    }

    #[tokio::test]
    async fn empty_ranking_yields_no_results() {
        let videos = [video("aaa", "first")];
        let model = ScriptedModel("[]");

        let results = rank_library(&model, "dragons", &videos).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn malformed_ranking_is_an_error() {
        let videos = [video("aaa", "first")];
        let model = ScriptedModel("here are your videos!");

        assert!(rank_library(&model, "anything", &videos).await.is_err());
    }

    #[test]
    fn prompt_carries_metadata_but_truncates_descriptions() {
        let mut long_description = video("aaa", "first");
        long_description.description = "x".repeat(600);

        let request = ranking_request("rust tutorials", &[long_description]);
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.max_tokens, 1000);
        assert!(request.user.contains("Search query: \"rust tutorials\""));
        assert!(request.user.contains("Video ID: aaa"));
        assert!(request.user.contains("Tags: rust, wasm"));
        assert!(request.user.contains(&"x".repeat(500)));
        assert!(!request.user.contains(&"x".repeat(501)));
        assert!(request.system.contains("JSON array of video IDs"));
    }
}
