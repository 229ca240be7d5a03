use crate::models::VideoRecord;
use crate::services::openai::{ChatModel, CompletionRequest};
use anyhow::Result;
use log::{error, info};

/// Transcripts are analyzed in fixed-size batches to bound prompt size.
pub const BATCH_SIZE: usize = 5;

const EXTRACTION_TEMPERATURE: f32 = 0.3;
const EXTRACTION_MAX_TOKENS: u32 = 2000;
const SUMMARY_TEMPERATURE: f32 = 0.4;
const SUMMARY_MAX_TOKENS: u32 = 3000;

/// A transcript-bearing video as fed to the extraction pass.
#[derive(Debug, Clone)]
pub struct TranscriptVideo {
    pub title: String,
    pub channel_title: String,
    pub transcript: String,
}

impl TranscriptVideo {
    pub fn from_record(record: &VideoRecord) -> Option<TranscriptVideo> {
        let transcript = record.transcript.as_deref()?.trim();
        if transcript.is_empty() {
            return None;
        }
        Some(TranscriptVideo {
            title: record.title.clone(),
            channel_title: record.channel_title.clone(),
            transcript: transcript.to_string(),
        })
    }
}

/// Per-batch result of the extraction pass. Failures are isolated to
/// their batch; only the summarization step can fail the whole run.
#[derive(Debug)]
pub enum BatchOutcome {
    Extracted(String),
    Empty,
    Skipped { reason: String },
}

#[derive(Debug)]
pub struct AnalysisReport {
    pub summary: String,
    pub raw_data: String,
    pub videos_analyzed: usize,
    pub batches_skipped: usize,
}

/// Two-pass analysis over a user's transcript-bearing videos: one
/// extraction completion per batch, then exactly one summarization
/// completion over the concatenated evidence. Batches run
/// sequentially, so the evidence document preserves batch order.
pub async fn analyze_library(
    model: &dyn ChatModel,
    theory: &str,
    videos: &[TranscriptVideo],
) -> Result<AnalysisReport> {
    let total_batches = videos.len().div_ceil(BATCH_SIZE);
    let mut outcomes: Vec<BatchOutcome> = Vec::with_capacity(total_batches);

    for (index, batch) in videos.chunks(BATCH_SIZE).enumerate() {
        info!("Processing batch {} of {total_batches}", index + 1);

        match model.complete(&extraction_request(theory, batch)).await {
            Ok(text) if !text.trim().is_empty() => outcomes.push(BatchOutcome::Extracted(text)),
            Ok(_) => outcomes.push(BatchOutcome::Empty),
            Err(e) => {
                error!("Extraction failed in batch {}: {e:?}", index + 1);
                outcomes.push(BatchOutcome::Skipped {
                    reason: e.to_string(),
                });
            }
        }
    }

    let batches_skipped = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Skipped { .. }))
        .count();

    let extracted: Vec<&str> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            BatchOutcome::Extracted(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();

    if extracted.is_empty() {
        return Ok(AnalysisReport {
            summary: format!(
                "No relevant information found about \"{theory}\" in your video library."
            ),
            raw_data: String::new(),
            videos_analyzed: videos.len(),
            batches_skipped,
        });
    }

    let raw_data = extracted.join("\n\n");
    info!("Extracted relevant data, generating summary...");

    let summary = model.complete(&summary_request(theory, &raw_data)).await?;

    Ok(AnalysisReport {
        summary,
        raw_data,
        videos_analyzed: videos.len(),
        batches_skipped,
    })
}

fn batch_content(batch: &[TranscriptVideo]) -> String {
    batch
        .iter()
        .map(|video| {
            format!(
                "Video: \"{}\" by {}\nTranscript: {}\n---",
                video.title, video.channel_title, video.transcript
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn extraction_request(theory: &str, batch: &[TranscriptVideo]) -> CompletionRequest {
    CompletionRequest {
        system: format!(
            "You are an expert at extracting relevant information from video transcripts. \
             Extract any information that relates to the user's query: \"{theory}\".\n\n\
             For each video, if there is relevant information, respond with:\n\
             \"VIDEO: [title] - [channel]\nRELEVANT INFO: [extracted information]\n---\"\n\n\
             If a video has no relevant information, skip it entirely. Be thorough but concise."
        ),
        user: format!(
            "Please extract information related to \"{theory}\" from these video transcripts:\n\n{}",
            batch_content(batch)
        ),
        temperature: EXTRACTION_TEMPERATURE,
        max_tokens: EXTRACTION_MAX_TOKENS,
    }
}

fn summary_request(theory: &str, combined: &str) -> CompletionRequest {
    CompletionRequest {
        system: format!(
            "You are an expert at synthesizing information from multiple sources. Create a \
             comprehensive, well-organized summary about \"{theory}\" based on the extracted \
             information from video transcripts.\n\n\
             Structure your response with:\n\
             1. Overview/Introduction\n\
             2. Key Points (organized by theme/topic)\n\
             3. Different Perspectives (if any)\n\
             4. Conclusion/Summary\n\n\
             Make it informative, well-formatted, and easy to read. Include references to the \
             source videos when relevant."
        ),
        user: format!(
            "Please create a comprehensive summary about \"{theory}\" based on this extracted \
             information from video transcripts:\n\n{combined}"
        ),
        temperature: SUMMARY_TEMPERATURE,
        max_tokens: SUMMARY_MAX_TOKENS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted model: pops one canned reply per call and records the
    /// requests it saw.
    struct ScriptedModel {
        replies: Mutex<Vec<Result<String>>>,
        calls: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String>>) -> Self {
            ScriptedModel {
                replies: Mutex::new(replies),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn calls(&self) -> Vec<CompletionRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.calls.lock().unwrap().push(request.clone());
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(anyhow!("no scripted reply left"));
            }
            replies.remove(0)
        }
    }

    fn videos(n: usize) -> Vec<TranscriptVideo> {
        (0..n)
            .map(|i| TranscriptVideo {
                title: format!("Video {i}"),
                channel_title: "Channel".to_string(),
                transcript: format!("transcript {i}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn issues_one_extraction_per_batch_plus_one_summary() {
        // 12 videos -> ceil(12/5) = 3 extraction calls, then 1 summary.
        let model = ScriptedModel::new(vec![
            Ok("evidence A".to_string()),
            Ok("evidence B".to_string()),
            Ok("evidence C".to_string()),
            Ok("the summary".to_string()),
        ]);

        let report = analyze_library(&model, "flat earth", &videos(12)).await.unwrap();

        assert_eq!(model.call_count(), 4);
        assert_eq!(report.summary, "the summary");
        assert_eq!(report.raw_data, "evidence A\n\nevidence B\n\nevidence C");
        assert_eq!(report.videos_analyzed, 12);
        assert_eq!(report.batches_skipped, 0);
    }

    #[tokio::test]
    async fn failed_batch_is_skipped_and_order_preserved() {
        // 7 videos -> batches of 5 and 2. Batch 1 errors, batch 2
        // succeeds: the evidence is batch 2's output only.
        let model = ScriptedModel::new(vec![
            Err(anyhow!("rate limited")),
            Ok("evidence from batch 2".to_string()),
            Ok("summary".to_string()),
        ]);

        let report = analyze_library(&model, "moon landing", &videos(7)).await.unwrap();

        assert_eq!(model.call_count(), 3);
        assert_eq!(report.raw_data, "evidence from batch 2");
        assert_eq!(report.videos_analyzed, 7);
        assert_eq!(report.batches_skipped, 1);
    }

    #[tokio::test]
    async fn no_extracted_evidence_skips_the_summary_call() {
        let model = ScriptedModel::new(vec![Ok(String::new()), Ok("  ".to_string())]);

        let report = analyze_library(&model, "dragons", &videos(7)).await.unwrap();

        // Two extraction calls, no summarization call.
        assert_eq!(model.call_count(), 2);
        assert_eq!(
            report.summary,
            "No relevant information found about \"dragons\" in your video library."
        );
        assert!(report.raw_data.is_empty());
        assert_eq!(report.batches_skipped, 0);
    }

    #[tokio::test]
    async fn empty_library_makes_no_model_call() {
        let model = ScriptedModel::new(vec![]);

        let report = analyze_library(&model, "anything", &[]).await.unwrap();

        assert_eq!(model.call_count(), 0);
        assert!(report.raw_data.is_empty());
        assert_eq!(report.videos_analyzed, 0);
        assert!(report.summary.contains("No relevant information found"));
    }

    #[tokio::test]
    async fn summary_failure_is_fatal() {
        let model = ScriptedModel::new(vec![
            Ok("evidence".to_string()),
            Err(anyhow!("OpenAI API error: overloaded")),
        ]);

        let result = analyze_library(&model, "ufos", &videos(3)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn extraction_prompt_carries_theory_and_batch() {
        let model = ScriptedModel::new(vec![Ok(String::new())]);
        analyze_library(&model, "simulation theory", &videos(2)).await.unwrap();

        let calls = model.calls();
        assert!(calls[0].system.contains("simulation theory"));
        assert!(calls[0].user.contains("Video: \"Video 0\" by Channel"));
        assert!(calls[0].user.contains("Video: \"Video 1\" by Channel"));
        assert_eq!(calls[0].temperature, EXTRACTION_TEMPERATURE);
        assert_eq!(calls[0].max_tokens, EXTRACTION_MAX_TOKENS);
    }

    #[test]
    fn record_without_transcript_is_not_a_source() {
        let record = VideoRecord {
            title: "t".to_string(),
            transcript: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(TranscriptVideo::from_record(&record).is_none());

        let record = VideoRecord {
            transcript: Some("words".to_string()),
            ..Default::default()
        };
        assert!(TranscriptVideo::from_record(&record).is_some());
    }
}
