use crate::normalize::normalize;
use crate::RawVideo;

/// Default for absent text fields.
pub const NOT_AVAILABLE: &str = "N/A";
/// Default for absent counters.
pub const ZERO_COUNT: &str = "0";

/// Export column names, in the order produced by [`VideoRecord::to_row`].
pub const COLUMNS: [&str; 22] = [
    "channel_name",
    "video_id",
    "url",
    "title",
    "description",
    "published_at",
    "channel_title",
    "tags",
    "category_id",
    "live_broadcast_content",
    "duration",
    "view_count",
    "like_count",
    "favorite_count",
    "comment_count",
    "upload_status",
    "privacy_status",
    "topic_categories",
    "actual_start_time",
    "actual_end_time",
    "concurrent_viewers",
    "archive_end_time",
];

pub fn video_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Flat, schema-stable row describing one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub channel_name: String,
    pub video_id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub channel_title: String,
    pub tags: Vec<String>,
    pub category_id: String,
    pub live_broadcast_content: String,
    pub duration: String,
    pub view_count: String,
    pub like_count: String,
    pub favorite_count: String,
    pub comment_count: String,
    pub upload_status: String,
    pub privacy_status: String,
    pub topic_categories: Vec<String>,
    pub actual_start_time: String,
    pub actual_end_time: String,
    pub concurrent_viewers: String,
    pub archive_end_time: String,
}

/// What enrichment produced for a single requested identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoOutcome {
    Enriched(RawVideo),
    /// Metadata could not be retrieved; only the identifier is known.
    Unavailable { video_id: String },
}

impl VideoRecord {
    /// Record with identifier and URL populated and every other field at its default.
    pub fn placeholder(channel_name: &str, video_id: &str) -> Self {
        let na = || NOT_AVAILABLE.to_string();
        let zero = || ZERO_COUNT.to_string();
        Self {
            channel_name: channel_name.to_string(),
            video_id: video_id.to_string(),
            url: video_url(video_id),
            title: na(),
            description: na(),
            published_at: na(),
            channel_title: na(),
            tags: Vec::new(),
            category_id: na(),
            live_broadcast_content: na(),
            duration: na(),
            view_count: zero(),
            like_count: zero(),
            favorite_count: zero(),
            comment_count: zero(),
            upload_status: na(),
            privacy_status: na(),
            topic_categories: Vec::new(),
            actual_start_time: na(),
            actual_end_time: na(),
            concurrent_viewers: na(),
            archive_end_time: na(),
        }
    }

    pub fn from_outcome(channel_name: &str, outcome: &VideoOutcome) -> Self {
        match outcome {
            VideoOutcome::Enriched(raw) => normalize(channel_name, raw),
            VideoOutcome::Unavailable { video_id } => Self::placeholder(channel_name, video_id),
        }
    }

    /// Cell values in [`COLUMNS`] order. List fields are rendered as JSON arrays.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.channel_name.clone(),
            self.video_id.clone(),
            self.url.clone(),
            self.title.clone(),
            self.description.clone(),
            self.published_at.clone(),
            self.channel_title.clone(),
            json_list(&self.tags),
            self.category_id.clone(),
            self.live_broadcast_content.clone(),
            self.duration.clone(),
            self.view_count.clone(),
            self.like_count.clone(),
            self.favorite_count.clone(),
            self.comment_count.clone(),
            self.upload_status.clone(),
            self.privacy_status.clone(),
            json_list(&self.topic_categories),
            self.actual_start_time.clone(),
            self.actual_end_time.clone(),
            self.concurrent_viewers.clone(),
            self.archive_end_time.clone(),
        ]
    }
}

fn json_list(values: &[String]) -> String {
    serde_json::Value::from(values.to_vec()).to_string()
}
