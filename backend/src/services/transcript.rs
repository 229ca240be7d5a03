use crate::models::VideoRecord;
use crate::services::openai::CompletionRequest;
use crate::utils::parse_iso8601_duration_to_seconds;

const SYNTHESIS_TEMPERATURE: f32 = 0.7;
const SYNTHESIS_MAX_TOKENS: u32 = 1500;

/// A stored transcript makes generation an idempotent no-op.
pub fn existing_transcript(video: &VideoRecord) -> Option<&str> {
    video
        .transcript
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Prompt for synthesizing a plausible transcript from stored
/// metadata. This is a declared approximation of the video's speech,
/// not speech-to-text.
pub fn synthesis_request(video: &VideoRecord) -> CompletionRequest {
    let minutes = (parse_iso8601_duration_to_seconds(&video.duration) / 60).max(1);

    CompletionRequest {
        system: "You are a transcription assistant. Write a plausible spoken-word transcript for \
                 a YouTube video based on its metadata. Produce plain prose with no timestamps or \
                 speaker labels. This is an approximation of what the video likely says, not a \
                 real transcription."
            .to_string(),
        user: format!(
            "Write a transcript for the video \"{}\" by {}. The video runs roughly {} minute(s); \
             keep the transcript proportionate to that length.",
            video.title, video.channel_title, minutes
        ),
        temperature: SYNTHESIS_TEMPERATURE,
        max_tokens: SYNTHESIS_MAX_TOKENS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_transcript_does_not_short_circuit() {
        let video = VideoRecord {
            transcript: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(existing_transcript(&video).is_none());

        let video = VideoRecord {
            transcript: Some("spoken words".to_string()),
            ..Default::default()
        };
        assert_eq!(existing_transcript(&video), Some("spoken words"));
    }

    #[test]
    fn synthesis_prompt_uses_title_channel_and_duration() {
        let video = VideoRecord {
            title: "How magnets work".to_string(),
            channel_title: "Science Hour".to_string(),
            duration: "PT12M30S".to_string(),
            ..Default::default()
        };

        let request = synthesis_request(&video);
        assert!(request.user.contains("How magnets work"));
        assert!(request.user.contains("Science Hour"));
        assert!(request.user.contains("12 minute(s)"));
    }

    #[test]
    fn unknown_duration_defaults_to_one_minute() {
        let video = VideoRecord::default();
        let request = synthesis_request(&video);
        assert!(request.user.contains("1 minute(s)"));
    }
}
