//! YouTube Data API search backend for learning resources.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::recommendation::resources::ResourceSearch;
use crate::recommendation::ResourceItem;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: ItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Long-form video search. Timeouts are applied by the caller, per lookup.
#[derive(Clone)]
pub struct YouTubeSearch {
    client: Client,
    api_key: String,
}

impl YouTubeSearch {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ResourceSearch for YouTubeSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<ResourceItem>, AppError> {
        let max = max_results.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("key", self.api_key.as_str()),
                ("maxResults", max.as_str()),
                ("videoDuration", "long"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AppError::UpstreamUnavailable(format!(
                "video search returned {status}: {message}"
            )));
        }

        let parsed: SearchResponse = response.json().await?;
        let items = to_resource_items(parsed, max_results);
        debug!(query, count = items.len(), "Video search succeeded");
        Ok(items)
    }
}

/// Items without a video id cannot be linked and are skipped.
fn to_resource_items(response: SearchResponse, max_results: usize) -> Vec<ResourceItem> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            Some(ResourceItem::new(
                item.snippet.title,
                format!("{WATCH_URL}{video_id}"),
            ))
        })
        .take(max_results)
        .collect()
}
