//! Collector core: pure domain types, normalization and retry/window policies.
mod channel;
mod normalize;
mod record;
mod retry;
mod text;
mod window;
mod wire;

pub use channel::{Channel, UploadsPlaylistRef};
pub use normalize::normalize;
pub use record::{
    video_url, VideoOutcome, VideoRecord, COLUMNS, NOT_AVAILABLE, ZERO_COUNT,
};
pub use retry::{FailureClass, RetryDecision, RetryPolicy, TRANSIENT_STATUSES};
pub use text::clean_text;
pub use window::{select_page, target_date, ListingItem, ListingPage, PageSelection};
pub use wire::{
    ChannelContentDetails, ChannelItem, ChannelListResponse, ChannelSnippet,
    LiveStreamingDetails, PlaylistItem, PlaylistItemContentDetails, PlaylistItemListResponse,
    PlaylistItemSnippet, RawVideo, RelatedPlaylists, TopicDetails, VideoContentDetails,
    VideoListResponse, VideoSnippet, VideoStatistics, VideoStatus, WireError,
};
