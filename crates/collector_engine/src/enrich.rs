use std::collections::HashMap;

use collector_core::{RawVideo, VideoOutcome, VideoRecord};
use collector_logging::{collector_error, collector_warn};

use crate::{RetryingFetcher, VideoApi};

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Fetches full metadata in batches. Yields exactly one record per input identifier.
pub struct BatchEnricher<'a> {
    api: &'a dyn VideoApi,
    fetcher: &'a RetryingFetcher,
    batch_size: usize,
}

impl<'a> BatchEnricher<'a> {
    pub fn new(api: &'a dyn VideoApi, fetcher: &'a RetryingFetcher, batch_size: usize) -> Self {
        Self {
            api,
            fetcher,
            batch_size: batch_size.clamp(1, DEFAULT_BATCH_SIZE),
        }
    }

    pub async fn enrich(&self, channel_name: &str, video_ids: &[String]) -> Vec<VideoRecord> {
        let mut records = Vec::with_capacity(video_ids.len());
        for chunk in video_ids.chunks(self.batch_size) {
            let outcomes = match self
                .fetcher
                .call("fetch video details", || self.api.fetch_videos(chunk))
                .await
            {
                Ok(items) => match_chunk(chunk, items),
                Err(err) => {
                    collector_error!(
                        "video details unavailable for {} id(s) starting at {}; writing placeholders: {err}",
                        chunk.len(),
                        chunk[0]
                    );
                    chunk
                        .iter()
                        .map(|id| VideoOutcome::Unavailable {
                            video_id: id.clone(),
                        })
                        .collect()
                }
            };
            records.extend(
                outcomes
                    .iter()
                    .map(|outcome| VideoRecord::from_outcome(channel_name, outcome)),
            );
        }
        records
    }
}

/// Pair each requested id with the item the remote returned for it, in request order.
fn match_chunk(chunk: &[String], items: Vec<RawVideo>) -> Vec<VideoOutcome> {
    let by_id: HashMap<String, RawVideo> = items
        .into_iter()
        .filter_map(|item| item.id.clone().map(|id| (id, item)))
        .collect();

    let outcomes: Vec<VideoOutcome> = chunk
        .iter()
        .map(|id| match by_id.get(id) {
            Some(raw) => VideoOutcome::Enriched(raw.clone()),
            None => VideoOutcome::Unavailable {
                video_id: id.clone(),
            },
        })
        .collect();

    let missing = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, VideoOutcome::Unavailable { .. }))
        .count();
    if missing > 0 {
        collector_warn!("{missing} requested video(s) were not returned by the remote");
    }
    outcomes
}
