use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use collector_core::Channel;
use collector_logging::collector_warn;

/// Accepted header names for the channel id column.
const ID_COLUMNS: [&str; 2] = ["채널 ID", "channel_id"];
/// Accepted header names for the channel name column.
const NAME_COLUMNS: [&str; 2] = ["채널명", "channel_name"];

#[derive(Debug, thiserror::Error)]
pub enum ChannelListError {
    #[error("channel list not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read channel list {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("channel list has no `{0}` column")]
    MissingColumn(&'static str),
    #[error("malformed channel list: {0}")]
    Csv(#[from] csv::Error),
}

/// Read the channel list CSV at `path`.
pub fn load_channel_list(path: &Path) -> Result<Vec<Channel>, ChannelListError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ChannelListError::NotFound(path.to_path_buf()),
        _ => ChannelListError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    parse_channel_list(&content)
}

/// Parse channel list CSV text. A leading UTF-8 BOM is ignored; rows with a
/// blank channel id are skipped.
pub fn parse_channel_list(content: &str) -> Result<Vec<Channel>, ChannelListError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let id_idx = find_column(&headers, &ID_COLUMNS)
        .ok_or(ChannelListError::MissingColumn(ID_COLUMNS[0]))?;
    let name_idx = find_column(&headers, &NAME_COLUMNS)
        .ok_or(ChannelListError::MissingColumn(NAME_COLUMNS[0]))?;

    let mut channels = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let id = record.get(id_idx).unwrap_or_default().trim();
        let name = record.get(name_idx).unwrap_or_default().trim();
        if id.is_empty() {
            // Header is line 1.
            collector_warn!("channel list line {} has no channel id; skipped", row + 2);
            continue;
        }
        channels.push(Channel::new(id, name));
    }
    Ok(channels)
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| names.iter().any(|name| header.trim() == *name))
}
