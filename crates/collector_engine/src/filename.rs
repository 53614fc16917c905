use chrono::NaiveDateTime;

/// `youtube_videos_metadata_{YYYYMMDD_HHMMSS}.csv` for the given generation time.
pub fn export_filename(generated_at: NaiveDateTime) -> String {
    format!(
        "youtube_videos_metadata_{}.csv",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}
