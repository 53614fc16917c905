#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use collector_core::{
    ListingItem, ListingPage, RawVideo, RetryPolicy, UploadsPlaylistRef, VideoSnippet,
};
use collector_engine::{ApiError, RetryingFetcher, Sleeper};

/// Records requested delays instead of waiting.
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

pub fn fetcher(sleeper: Arc<RecordingSleeper>) -> RetryingFetcher {
    RetryingFetcher::new(RetryPolicy::default(), sleeper)
}

/// 2024-05-10 09:00 UTC; the target date is 2024-05-09.
pub fn run_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap()
}

pub fn listed(id: &str, published: &str) -> ListingItem {
    ListingItem {
        video_id: Some(id.to_string()),
        published_at: Some(
            DateTime::parse_from_rfc3339(published)
                .unwrap()
                .with_timezone(&Utc),
        ),
    }
}

pub fn page(items: Vec<ListingItem>, next: Option<&str>) -> ListingPage {
    ListingPage {
        items,
        next_page_token: next.map(str::to_string),
    }
}

pub fn server_error() -> ApiError {
    ApiError::HttpStatus {
        status: 500,
        message: "backend error".into(),
    }
}

pub fn raw_video(id: &str) -> RawVideo {
    RawVideo {
        id: Some(id.to_string()),
        snippet: Some(VideoSnippet {
            title: Some(format!("title {id}")),
            ..VideoSnippet::default()
        }),
        ..RawVideo::default()
    }
}

/// Scripted [`collector_engine::VideoApi`]. Queued results are consumed in order;
/// once a queue is empty the fallback behaviour applies.
pub struct FakeApi {
    pub resolve_results: Mutex<VecDeque<Result<Option<UploadsPlaylistRef>, ApiError>>>,
    pub page_results: Mutex<VecDeque<Result<ListingPage, ApiError>>>,
    pub video_results: Mutex<VecDeque<Result<Vec<RawVideo>, ApiError>>>,
    pub resolve_calls: Mutex<usize>,
    pub page_tokens: Mutex<Vec<Option<String>>>,
    pub video_requests: Mutex<Vec<Vec<String>>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            resolve_results: Mutex::new(VecDeque::new()),
            page_results: Mutex::new(VecDeque::new()),
            video_results: Mutex::new(VecDeque::new()),
            resolve_calls: Mutex::new(0),
            page_tokens: Mutex::new(Vec::new()),
            video_requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn with_pages(pages: Vec<Result<ListingPage, ApiError>>) -> Self {
        let api = Self::default();
        api.page_results.lock().unwrap().extend(pages);
        api
    }

    pub fn push_resolve(&self, result: Result<Option<UploadsPlaylistRef>, ApiError>) {
        self.resolve_results.lock().unwrap().push_back(result);
    }

    pub fn push_videos(&self, result: Result<Vec<RawVideo>, ApiError>) {
        self.video_results.lock().unwrap().push_back(result);
    }

    pub fn resolve_calls(&self) -> usize {
        *self.resolve_calls.lock().unwrap()
    }

    pub fn page_calls(&self) -> usize {
        self.page_tokens.lock().unwrap().len()
    }

    pub fn video_requests(&self) -> Vec<Vec<String>> {
        self.video_requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl collector_engine::VideoApi for FakeApi {
    async fn resolve_channel(
        &self,
        _channel_id: &str,
    ) -> Result<Option<UploadsPlaylistRef>, ApiError> {
        *self.resolve_calls.lock().unwrap() += 1;
        self.resolve_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(Some(UploadsPlaylistRef {
                    playlist_id: "UUexample".into(),
                    channel_title: "Example News".into(),
                }))
            })
    }

    async fn list_uploads_page(
        &self,
        _playlist_id: &str,
        page_token: Option<&str>,
        _max_results: u32,
    ) -> Result<ListingPage, ApiError> {
        self.page_tokens
            .lock()
            .unwrap()
            .push(page_token.map(str::to_string));
        self.page_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ListingPage::default()))
    }

    async fn fetch_videos(&self, video_ids: &[String]) -> Result<Vec<RawVideo>, ApiError> {
        self.video_requests.lock().unwrap().push(video_ids.to_vec());
        self.video_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(video_ids.iter().map(|id| raw_video(id)).collect()))
    }
}
