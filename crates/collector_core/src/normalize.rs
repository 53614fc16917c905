use crate::record::{video_url, VideoRecord, NOT_AVAILABLE, ZERO_COUNT};
use crate::text::clean_text;
use crate::RawVideo;

/// Map a raw `videos.list` item onto the flat export record.
///
/// Absent sections or fields fall back to `N/A`, `0` for counters, or an empty
/// list. Title and description are cleaned so a row never spans several lines.
pub fn normalize(channel_name: &str, raw: &RawVideo) -> VideoRecord {
    let video_id = text_or_na(raw.id.as_deref());
    let snippet = raw.snippet.clone().unwrap_or_default();
    let content_details = raw.content_details.clone().unwrap_or_default();
    let statistics = raw.statistics.clone().unwrap_or_default();
    let status = raw.status.clone().unwrap_or_default();
    let topic_details = raw.topic_details.clone().unwrap_or_default();
    let live = raw.live_streaming_details.clone().unwrap_or_default();

    VideoRecord {
        channel_name: channel_name.to_string(),
        url: video_url(&video_id),
        video_id,
        title: clean_text(snippet.title.as_deref().unwrap_or(NOT_AVAILABLE)),
        description: clean_text(snippet.description.as_deref().unwrap_or(NOT_AVAILABLE)),
        published_at: text_or_na(snippet.published_at.as_deref()),
        channel_title: text_or_na(snippet.channel_title.as_deref()),
        tags: snippet.tags.unwrap_or_default(),
        category_id: text_or_na(snippet.category_id.as_deref()),
        live_broadcast_content: text_or_na(snippet.live_broadcast_content.as_deref()),
        duration: text_or_na(content_details.duration.as_deref()),
        view_count: count_or_zero(statistics.view_count),
        like_count: count_or_zero(statistics.like_count),
        favorite_count: count_or_zero(statistics.favorite_count),
        comment_count: count_or_zero(statistics.comment_count),
        upload_status: text_or_na(status.upload_status.as_deref()),
        privacy_status: text_or_na(status.privacy_status.as_deref()),
        topic_categories: topic_details.topic_categories.unwrap_or_default(),
        actual_start_time: text_or_na(live.actual_start_time.as_deref()),
        actual_end_time: text_or_na(live.actual_end_time.as_deref()),
        concurrent_viewers: text_or_na(live.concurrent_viewers.as_deref()),
        archive_end_time: text_or_na(live.archive_end_time.as_deref()),
    }
}

fn text_or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

fn count_or_zero(value: Option<String>) -> String {
    value.unwrap_or_else(|| ZERO_COUNT.to_string())
}
