use std::time::Duration;

use collector_core::{
    ChannelListResponse, ListingPage, PlaylistItemListResponse, RawVideo, UploadsPlaylistRef,
    VideoListResponse,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::ApiError;

const VIDEO_PARTS: &str =
    "snippet,contentDetails,statistics,status,topicDetails,liveStreamingDetails";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The three read-only calls the collector makes against the video platform.
#[async_trait::async_trait]
pub trait VideoApi: Send + Sync {
    /// `Ok(None)` when the remote has no such channel.
    async fn resolve_channel(
        &self,
        channel_id: &str,
    ) -> Result<Option<UploadsPlaylistRef>, ApiError>;

    async fn list_uploads_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<ListingPage, ApiError>;

    /// Full metadata for at most 50 identifiers.
    async fn fetch_videos(&self, video_ids: &[String]) -> Result<Vec<RawVideo>, ApiError>;
}

/// YouTube Data API v3 client authenticated with an API key.
#[derive(Clone)]
pub struct YouTubeApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeApi {
    pub fn new(settings: &ApiSettings, api_key: impl Into<String>) -> Result<Self, ApiError> {
        Url::parse(&settings.base_url)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(map_reqwest_error)?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}/{resource}", self.base_url))
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(resource, params)?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        serde_json::from_slice(&body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}

#[async_trait::async_trait]
impl VideoApi for YouTubeApi {
    async fn resolve_channel(
        &self,
        channel_id: &str,
    ) -> Result<Option<UploadsPlaylistRef>, ApiError> {
        let response: ChannelListResponse = self
            .get_json("channels", &[("part", "contentDetails,snippet"), ("id", channel_id)])
            .await?;
        response
            .into_uploads_ref()
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    async fn list_uploads_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<ListingPage, ApiError> {
        let max_results = max_results.to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        let response: PlaylistItemListResponse = self.get_json("playlistItems", &params).await?;
        Ok(response.into_page())
    }

    async fn fetch_videos(&self, video_ids: &[String]) -> Result<Vec<RawVideo>, ApiError> {
        let ids = video_ids.join(",");
        let response: VideoListResponse = self
            .get_json("videos", &[("part", VIDEO_PARTS), ("id", ids.as_str())])
            .await?;
        Ok(response.items)
    }
}

/// Pull `error.message` out of a Google API error body, falling back to the status text.
fn error_message(body: &[u8], status: reqwest::StatusCode) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| status.to_string())
}

// The request URL carries the API key and must not reach the logs.
fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    let err = err.without_url();
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return ApiError::InvalidResponse(err.to_string());
    }
    ApiError::Network(err.to_string())
}
