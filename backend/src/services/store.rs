use crate::config::{supabase_service_key, SUPABASE_URL};
use crate::models::VideoRecord;
use anyhow::{anyhow, Result};

const TABLE: &str = "youtube_videos";

// Every video row is unique per (owning user, platform video id); the
// upsert merges on that key so re-ingesting never duplicates a row.
const UPSERT_CONFLICT_KEY: &str = "user_id,video_id";

/// Thin PostgREST client for the video table. All reads and writes are
/// scoped by the owning user's identifier.
pub struct SupabaseStore {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(http: reqwest::Client, base_url: String, service_key: String) -> Self {
        SupabaseStore {
            http,
            base_url,
            service_key,
        }
    }

    pub fn from_env(http: &reqwest::Client) -> Result<Self> {
        Ok(SupabaseStore::new(
            http.clone(),
            SUPABASE_URL.clone(),
            supabase_service_key()?,
        ))
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.base_url)
    }

    async fn select(&self, query: &[(String, String)]) -> Result<Vec<VideoRecord>> {
        let response = self
            .http
            .get(self.table_url())
            .query(query)
            .header("apikey", self.service_key.as_str())
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Failed to fetch videos ({status}): {body}"));
        }

        Ok(response.json().await?)
    }

    pub async fn list_videos(&self, user_id: &str) -> Result<Vec<VideoRecord>> {
        self.select(&select_query(user_id, SelectFilter::All, None))
            .await
    }

    pub async fn recent_videos(&self, user_id: &str, limit: usize) -> Result<Vec<VideoRecord>> {
        self.select(&select_query(user_id, SelectFilter::All, Some(limit)))
            .await
    }

    pub async fn videos_with_transcripts(&self, user_id: &str) -> Result<Vec<VideoRecord>> {
        self.select(&select_query(user_id, SelectFilter::WithTranscript, None))
            .await
    }

    pub async fn find_video(&self, user_id: &str, video_id: &str) -> Result<Option<VideoRecord>> {
        let mut query = select_query(user_id, SelectFilter::All, Some(1));
        query.push(("video_id".to_string(), format!("eq.{video_id}")));
        Ok(self.select(&query).await?.into_iter().next())
    }

    pub async fn upsert_videos(&self, videos: &[VideoRecord]) -> Result<()> {
        let response = self
            .http
            .post(self.table_url())
            .query(&[("on_conflict", UPSERT_CONFLICT_KEY)])
            .header("apikey", self.service_key.as_str())
            .bearer_auth(&self.service_key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(videos)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Failed to save videos ({status}): {body}"));
        }

        Ok(())
    }

    pub async fn set_transcript(
        &self,
        user_id: &str,
        video_id: &str,
        transcript: &str,
    ) -> Result<()> {
        let response = self
            .http
            .patch(self.table_url())
            .query(&[
                ("user_id", format!("eq.{user_id}")),
                ("video_id", format!("eq.{video_id}")),
            ])
            .header("apikey", self.service_key.as_str())
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({ "transcript": transcript }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Failed to save transcript ({status}): {body}"));
        }

        Ok(())
    }
}

enum SelectFilter {
    All,
    WithTranscript,
}

fn select_query(
    user_id: &str,
    filter: SelectFilter,
    limit: Option<usize>,
) -> Vec<(String, String)> {
    let mut query = vec![
        ("select".to_string(), "*".to_string()),
        ("user_id".to_string(), format!("eq.{user_id}")),
        ("order".to_string(), "created_at.desc".to_string()),
    ];
    if let SelectFilter::WithTranscript = filter {
        query.push(("transcript".to_string(), "not.is.null".to_string()));
    }
    if let Some(limit) = limit {
        query.push(("limit".to_string(), limit.to_string()));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn select_query_scopes_by_user() {
        let query = select_query("user-1", SelectFilter::All, None);
        assert_eq!(get(&query, "user_id"), Some("eq.user-1"));
        assert_eq!(get(&query, "order"), Some("created_at.desc"));
        assert_eq!(get(&query, "transcript"), None);
        assert_eq!(get(&query, "limit"), None);
    }

    #[test]
    fn transcript_filter_and_limit_are_applied() {
        let query = select_query("user-1", SelectFilter::WithTranscript, Some(20));
        assert_eq!(get(&query, "transcript"), Some("not.is.null"));
        assert_eq!(get(&query, "limit"), Some("20"));
    }

    #[test]
    fn upsert_merges_on_user_and_video_id() {
        assert_eq!(UPSERT_CONFLICT_KEY, "user_id,video_id");
    }
}
