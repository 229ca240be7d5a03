use crate::models::VideoRecord;
use crate::services::openai::{ChatModel, CompletionRequest};
use anyhow::Result;

/// The chat context window: at most this many of the user's
/// most-recently-added videos are embedded in the system prompt.
pub const CHAT_CONTEXT_LIMIT: usize = 20;

const CHAT_TEMPERATURE: f32 = 0.7;
const CHAT_MAX_TOKENS: u32 = 500;
const CONTEXT_TAG_LIMIT: usize = 3;

/// One stateless chat turn. No conversation history is kept server
/// side; each call stands alone with a fresh library context.
pub async fn respond(
    model: &dyn ChatModel,
    message: &str,
    videos: &[VideoRecord],
) -> Result<String> {
    model
        .complete(&CompletionRequest {
            system: system_prompt(videos),
            user: message.to_string(),
            temperature: CHAT_TEMPERATURE,
            max_tokens: CHAT_MAX_TOKENS,
        })
        .await
}

fn system_prompt(videos: &[VideoRecord]) -> String {
    format!(
        "You are a helpful YouTube AI assistant. You help users analyze their YouTube video \
         library, discover content trends, suggest related topics, and provide insights about \
         video performance and content strategy.\n\n\
         When users ask questions, consider their video library context if available. You can:\n\
         - Analyze content patterns and themes\n\
         - Suggest new video topics based on their interests\n\
         - Provide insights about popular content in their collection\n\
         - Help with content strategy and planning\n\
         - Answer general YouTube and content creation questions\n\n\
         Be conversational, helpful, and insightful. If the user's video library is empty or you \
         don't have context, still provide helpful general advice about YouTube and content \
         creation.{}",
        video_context(videos)
    )
}

fn video_context(videos: &[VideoRecord]) -> String {
    if videos.is_empty() {
        return String::new();
    }

    let lines = videos
        .iter()
        .take(CHAT_CONTEXT_LIMIT)
        .map(|video| {
            let mut line = format!(
                "- \"{}\" by {} ({} views)",
                video.title, video.channel_title, video.view_count
            );
            if !video.tags.is_empty() {
                let tags: Vec<&str> = video
                    .tags
                    .iter()
                    .take(CONTEXT_TAG_LIMIT)
                    .map(String::as_str)
                    .collect();
                line.push_str(&format!(" | Tags: {}", tags.join(", ")));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("\n\nUser's YouTube Video Library Context:\n{lines}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str, tags: &[&str]) -> VideoRecord {
        VideoRecord {
            title: title.to_string(),
            channel_title: "Channel".to_string(),
            view_count: 1000,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn context_is_capped_at_twenty_videos() {
        let videos: Vec<VideoRecord> = (0..30).map(|i| video(&format!("v{i}"), &[])).collect();

        let context = video_context(&videos);
        assert!(context.contains("\"v19\""));
        assert!(!context.contains("\"v20\""));
        assert_eq!(context.matches("- \"").count(), CHAT_CONTEXT_LIMIT);
    }

    #[test]
    fn context_line_carries_at_most_three_tags() {
        let context = video_context(&[video("v", &["a", "b", "c", "d"])]);
        assert!(context.contains("Tags: a, b, c"));
        assert!(!context.contains("d"));
    }

    #[test]
    fn untagged_video_omits_tag_section() {
        let context = video_context(&[video("v", &[])]);
        assert!(!context.contains("Tags:"));
    }

    #[test]
    fn empty_library_still_yields_a_usable_prompt() {
        let prompt = system_prompt(&[]);
        assert!(prompt.contains("YouTube AI assistant"));
        assert!(!prompt.contains("Library Context"));
    }
}
