use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

use super::logging::LogDestination;

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
const CHANNEL_LIST_VAR: &str = "CHANNEL_LIST_PATH";
const OUTPUT_DIR_VAR: &str = "OUTPUT_DIR";
const API_BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";
const LOG_LEVEL_VAR: &str = "COLLECTOR_LOG_LEVEL";
const LOG_DEST_VAR: &str = "COLLECTOR_LOG_DEST";

const DEFAULT_CHANNEL_LIST: &str = "data/youtube_news_channel_list.csv";

/// Looks up one environment variable.
pub type Env<'a> = &'a dyn Fn(&str) -> Option<String>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set; export the API key before running")]
    MissingCredential(&'static str),
}

/// Everything the run needs from the environment except the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub channel_list: PathBuf,
    pub output_dir: PathBuf,
    pub api_base_url: Option<String>,
    pub log_level: LevelFilter,
    pub log_destination: LogDestination,
}

impl Settings {
    pub fn from_env(env: Env) -> Self {
        let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());
        Self {
            channel_list: non_empty(CHANNEL_LIST_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CHANNEL_LIST)),
            output_dir: non_empty(OUTPUT_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            api_base_url: non_empty(API_BASE_URL_VAR),
            log_level: non_empty(LOG_LEVEL_VAR)
                .and_then(|value| LevelFilter::from_str(value.trim()).ok())
                .unwrap_or(LevelFilter::Info),
            log_destination: non_empty(LOG_DEST_VAR)
                .and_then(|value| LogDestination::parse(&value))
                .unwrap_or(LogDestination::Terminal),
        }
    }
}

/// The API key. Unset and blank values are both treated as missing.
pub fn api_key(env: Env) -> Result<String, ConfigError> {
    env(API_KEY_VAR)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(ConfigError::MissingCredential(API_KEY_VAR))
}
