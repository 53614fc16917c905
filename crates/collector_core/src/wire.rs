//! Response bodies of the three YouTube Data API v3 list calls.
//!
//! Every field is optional: the remote omits whole sections depending on the
//! requested `part`s and on the video (e.g. no `liveStreamingDetails` for
//! regular uploads). Defaults are applied later by the normalizer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::record::NOT_AVAILABLE;
use crate::window::{ListingItem, ListingPage};
use crate::UploadsPlaylistRef;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WireError {
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelItem {
    pub content_details: Option<ChannelContentDetails>,
    pub snippet: Option<ChannelSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelSnippet {
    pub title: Option<String>,
}

impl ChannelListResponse {
    /// `Ok(None)` when the remote does not know the channel (empty `items`).
    pub fn into_uploads_ref(self) -> Result<Option<UploadsPlaylistRef>, WireError> {
        let Some(item) = self.items.into_iter().next() else {
            return Ok(None);
        };
        let playlist_id = item
            .content_details
            .and_then(|details| details.related_playlists)
            .and_then(|playlists| playlists.uploads)
            .ok_or(WireError::MissingField("contentDetails.relatedPlaylists.uploads"))?;
        let channel_title = item
            .snippet
            .and_then(|snippet| snippet.title)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Ok(Some(UploadsPlaylistRef {
            playlist_id,
            channel_title,
        }))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub snippet: Option<PlaylistItemSnippet>,
    pub content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: Option<String>,
}

impl PlaylistItemListResponse {
    pub fn into_page(self) -> ListingPage {
        let items = self
            .items
            .into_iter()
            .map(|item| ListingItem {
                video_id: item.content_details.and_then(|details| details.video_id),
                published_at: item
                    .snippet
                    .and_then(|snippet| snippet.published_at)
                    .and_then(|raw| parse_timestamp(&raw)),
            })
            .collect();
        ListingPage {
            items,
            next_page_token: self.next_page_token.filter(|token| !token.is_empty()),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<RawVideo>,
}

/// One entry of a `videos.list` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideo {
    pub id: Option<String>,
    pub snippet: Option<VideoSnippet>,
    pub content_details: Option<VideoContentDetails>,
    pub statistics: Option<VideoStatistics>,
    pub status: Option<VideoStatus>,
    pub topic_details: Option<TopicDetails>,
    pub live_streaming_details: Option<LiveStreamingDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub channel_title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<String>,
    pub live_broadcast_content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VideoContentDetails {
    pub duration: Option<String>,
}

/// Counts arrive as decimal strings; plain JSON numbers are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "string_or_number")]
    pub view_count: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub like_count: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub favorite_count: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub comment_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub upload_status: Option<String>,
    pub privacy_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDetails {
    pub topic_categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStreamingDetails {
    pub actual_start_time: Option<String>,
    pub actual_end_time: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub concurrent_viewers: Option<String>,
    pub archive_end_time: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Count>::deserialize(deserializer)?.map(|count| match count {
        Count::Text(text) => text,
        Count::Number(number) => number.to_string(),
    }))
}
