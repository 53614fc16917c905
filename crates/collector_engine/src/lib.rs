//! Collector engine: remote API access, retrying traversal and CSV export.
mod api;
mod channels;
mod collector;
mod enrich;
mod export;
mod fetch;
mod filename;
mod persist;
mod scan;
mod types;

pub use api::{ApiSettings, VideoApi, YouTubeApi};
pub use channels::{load_channel_list, parse_channel_list, ChannelListError};
pub use collector::{ChannelCollection, ChannelReport, Clock, Collector, CollectorConfig, RunReport};
pub use enrich::BatchEnricher;
pub use export::{build_csv, write_csv_export, ExportError, ExportSummary};
pub use fetch::{RetryingFetcher, Sleeper, TokioSleeper};
pub use filename::export_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use scan::{ChannelScan, ScanSettings, UploadScanner};
pub use types::{ApiError, FetchError};
