use std::sync::Arc;

use chrono::{DateTime, Utc};
use collector_core::{target_date, Channel, RetryPolicy, VideoRecord};
use collector_logging::{collector_info, enter_channel};

use crate::enrich::DEFAULT_BATCH_SIZE;
use crate::{
    ApiSettings, BatchEnricher, RetryingFetcher, ScanSettings, Sleeper, UploadScanner, VideoApi,
};

/// Source of the current UTC time; the target date is derived from it.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct CollectorConfig {
    pub api: ApiSettings,
    pub retry: RetryPolicy,
    pub scan: ScanSettings,
    pub batch_size: usize,
    pub now_utc: Clock,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            retry: RetryPolicy::default(),
            scan: ScanSettings::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            now_utc: Arc::new(Utc::now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    pub channel: Channel,
    /// Title reported by the remote, `N/A` when the channel could not be resolved.
    pub channel_title: String,
    pub records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub records: Vec<VideoRecord>,
    pub channels: Vec<ChannelReport>,
}

/// Drives scan and enrichment for each channel in turn.
pub struct Collector {
    api: Arc<dyn VideoApi>,
    fetcher: RetryingFetcher,
    config: CollectorConfig,
}

impl Collector {
    pub fn new(api: Arc<dyn VideoApi>, sleeper: Arc<dyn Sleeper>, config: CollectorConfig) -> Self {
        let fetcher = RetryingFetcher::new(config.retry, sleeper);
        Self {
            api,
            fetcher,
            config,
        }
    }

    /// Records for `channel`'s uploads of the previous UTC day. Empty when the
    /// channel cannot be resolved or has nothing on that day.
    pub async fn collect_channel(&self, channel: &Channel) -> ChannelCollection {
        let _scope = enter_channel(channel.name.clone());
        let target = target_date((self.config.now_utc)());
        collector_info!("collecting uploads of {target} for channel id {}", channel.id);

        let scanner = UploadScanner::new(self.api.as_ref(), &self.fetcher, self.config.scan);
        let scan = scanner.scan(&channel.id, target).await;
        collector_info!(
            "{} upload(s) found in {} page(s)",
            scan.video_ids.len(),
            scan.pages_fetched
        );

        let records = if scan.video_ids.is_empty() {
            Vec::new()
        } else {
            let enricher =
                BatchEnricher::new(self.api.as_ref(), &self.fetcher, self.config.batch_size);
            enricher.enrich(&scan.channel_title, &scan.video_ids).await
        };

        ChannelCollection {
            channel_title: scan.channel_title,
            records,
        }
    }

    /// Process `channels` one after another. Per-channel failures are logged and
    /// contribute no records; they never stop the run.
    pub async fn run(&self, channels: &[Channel]) -> RunReport {
        collector_info!("collecting videos from {} channel(s)", channels.len());
        let mut report = RunReport::default();
        for channel in channels {
            let collection = self.collect_channel(channel).await;
            log_channel_result(channel, &collection.records);
            report.channels.push(ChannelReport {
                channel: channel.clone(),
                channel_title: collection.channel_title,
                records: collection.records.len(),
            });
            report.records.extend(collection.records);
        }
        report
    }
}

/// Output of [`Collector::collect_channel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCollection {
    pub channel_title: String,
    pub records: Vec<VideoRecord>,
}

fn log_channel_result(channel: &Channel, records: &[VideoRecord]) {
    let _scope = enter_channel(channel.name.clone());
    if records.is_empty() {
        collector_info!("no uploads from yesterday (UTC) found, or the channel failed");
        return;
    }
    collector_info!("{} upload(s) from yesterday (UTC)", records.len());
    for record in records {
        collector_info!("  {} | {}", record.title, record.url);
    }
}
