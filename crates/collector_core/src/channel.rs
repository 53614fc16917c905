/// A channel taken from the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Uploads listing handle resolved from the remote for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadsPlaylistRef {
    pub playlist_id: String,
    /// Channel title as reported by the remote, `N/A` when absent.
    pub channel_title: String,
}
