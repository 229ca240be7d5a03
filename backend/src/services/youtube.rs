use crate::config::youtube_api_key;
use crate::models::VideoRecord;
use anyhow::{anyhow, Result};
use log::info;
use serde_json::Value;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const SEARCH_PAGE_SIZE: usize = 50;

/// Hard cap on how many of a channel's videos one ingestion walks.
pub const CHANNEL_VIDEO_CAP: usize = 200;

pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        YouTubeClient { http, api_key }
    }

    pub fn from_env(http: &reqwest::Client) -> Result<Self> {
        Ok(YouTubeClient::new(http.clone(), youtube_api_key()?))
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .http
            .get(format!("{API_BASE}/{path}"))
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let payload: Value = response.json().await?;

        if !status.is_success() {
            let message = payload["error"]["message"].as_str().unwrap_or("Unknown error");
            return Err(anyhow!("YouTube API error: {message}"));
        }

        Ok(payload)
    }

    /// Fetch full snippet/statistics/contentDetails for a set of video
    /// ids in one batched call.
    pub async fn fetch_video_details(
        &self,
        video_ids: &[String],
        user_id: &str,
    ) -> Result<Vec<VideoRecord>> {
        let ids = video_ids.join(",");
        // Documentation: https://developers.google.com/youtube/v3/docs/videos
        let payload = self
            .get_json(
                "videos",
                &[("part", "snippet,statistics,contentDetails"), ("id", &ids)],
            )
            .await?;

        let records = payload["items"]
            .as_array()
            .map(|items| items.iter().map(|item| video_from_item(user_id, item)).collect())
            .unwrap_or_default();

        Ok(records)
    }

    /// Canonical channel ids start with "UC". Anything else is treated
    /// as a legacy username, then a handle; if neither resolves the
    /// input is passed through unchanged.
    pub async fn resolve_channel_id(&self, channel_id: &str) -> Result<String> {
        if channel_id.starts_with("UC") {
            return Ok(channel_id.to_string());
        }

        for lookup in ["forUsername", "forHandle"] {
            let payload = self
                .get_json("channels", &[("part", "id"), (lookup, channel_id)])
                .await?;
            if let Some(id) = payload["items"][0]["id"].as_str() {
                return Ok(id.to_string());
            }
        }

        Ok(channel_id.to_string())
    }

    /// Enumerate a channel's video ids via the paged search endpoint,
    /// newest first, capped at [`CHANNEL_VIDEO_CAP`].
    pub async fn list_channel_video_ids(&self, channel_id: &str) -> Result<Vec<String>> {
        let mut ids: Vec<String> = Vec::new();
        let mut page_token = String::new();
        let max_results = SEARCH_PAGE_SIZE.to_string();

        loop {
            let mut query = vec![
                ("part", "snippet"),
                ("channelId", channel_id),
                ("type", "video"),
                ("order", "date"),
                ("maxResults", max_results.as_str()),
            ];
            if !page_token.is_empty() {
                query.push(("pageToken", page_token.as_str()));
            }

            let payload = self.get_json("search", &query).await?;

            if let Some(items) = payload["items"].as_array() {
                ids.extend(
                    items
                        .iter()
                        .filter_map(|item| item["id"]["videoId"].as_str().map(String::from)),
                );
            }
            info!("Fetched search page, total so far: {}", ids.len());

            page_token = payload["nextPageToken"].as_str().unwrap_or("").to_string();
            if page_token.is_empty() || ids.len() >= CHANNEL_VIDEO_CAP {
                break;
            }
        }

        ids.truncate(CHANNEL_VIDEO_CAP);
        Ok(ids)
    }
}

pub fn video_from_item(user_id: &str, item: &Value) -> VideoRecord {
    let snippet = &item["snippet"];
    let statistics = &item["statistics"];

    VideoRecord {
        user_id: user_id.to_string(),
        video_id: item["id"].as_str().unwrap_or("").to_string(),
        title: snippet["title"].as_str().unwrap_or("").to_string(),
        description: snippet["description"].as_str().unwrap_or("").to_string(),
        thumbnail_url: best_thumbnail(snippet),
        duration: item["contentDetails"]["duration"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        published_at: snippet["publishedAt"].as_str().unwrap_or("").to_string(),
        view_count: count(statistics, "viewCount"),
        like_count: count(statistics, "likeCount"),
        comment_count: count(statistics, "commentCount"),
        channel_id: snippet["channelId"].as_str().unwrap_or("").to_string(),
        channel_title: snippet["channelTitle"].as_str().unwrap_or("").to_string(),
        tags: snippet["tags"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
        category_id: snippet["categoryId"].as_str().map(String::from),
        default_language: snippet["defaultLanguage"]
            .as_str()
            .or_else(|| snippet["defaultAudioLanguage"].as_str())
            .map(String::from),
        transcript: None,
        created_at: None,
    }
}

fn best_thumbnail(snippet: &Value) -> Option<String> {
    ["maxres", "high", "medium", "default"]
        .iter()
        .find_map(|size| snippet["thumbnails"][size]["url"].as_str().map(String::from))
}

// The Data API reports counts as strings.
fn count(statistics: &Value, field: &str) -> i64 {
    statistics[field]
        .as_str()
        .unwrap_or("0")
        .parse()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_item() -> Value {
        json!({
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "title": "Never Gonna Give You Up",
                "description": "Official video",
                "publishedAt": "2009-10-25T06:57:33Z",
                "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                "channelTitle": "Rick Astley",
                "tags": ["rick astley", "music", "80s", "pop"],
                "categoryId": "10",
                "defaultAudioLanguage": "en",
                "thumbnails": {
                    "default": { "url": "https://i.ytimg.com/d.jpg" },
                    "high": { "url": "https://i.ytimg.com/h.jpg" }
                }
            },
            "statistics": {
                "viewCount": "1500000000",
                "likeCount": "17000000",
                "commentCount": "2300000"
            },
            "contentDetails": { "duration": "PT3M33S" }
        })
    }

    #[test]
    fn maps_api_item_to_record() {
        let record = video_from_item("user-1", &sample_item());

        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.video_id, "dQw4w9WgXcQ");
        assert_eq!(record.title, "Never Gonna Give You Up");
        assert_eq!(record.duration, "PT3M33S");
        assert_eq!(record.view_count, 1_500_000_000);
        assert_eq!(record.like_count, 17_000_000);
        assert_eq!(record.comment_count, 2_300_000);
        assert_eq!(record.channel_title, "Rick Astley");
        assert_eq!(record.tags.len(), 4);
        assert_eq!(record.category_id.as_deref(), Some("10"));
        assert_eq!(record.default_language.as_deref(), Some("en"));
        assert!(record.transcript.is_none());
    }

    #[test]
    fn picks_largest_available_thumbnail() {
        let record = video_from_item("user-1", &sample_item());
        assert_eq!(record.thumbnail_url.as_deref(), Some("https://i.ytimg.com/h.jpg"));
    }

    #[test]
    fn tolerates_missing_statistics() {
        let item = json!({
            "id": "abc12345678",
            "snippet": { "title": "t", "channelId": "UCx", "channelTitle": "c" },
            "contentDetails": { "duration": "PT1M" }
        });
        let record = video_from_item("user-1", &item);
        assert_eq!(record.view_count, 0);
        assert!(record.thumbnail_url.is_none());
        assert!(record.tags.is_empty());
    }
}
