use std::collections::HashSet;

use chrono::NaiveDate;
use collector_core::{select_page, NOT_AVAILABLE};
use collector_logging::{collector_debug, collector_error, collector_info, collector_warn};

use crate::{RetryingFetcher, VideoApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Upper bound on listing pages fetched per channel.
    pub max_pages: usize,
    pub page_size: u32,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_pages: 5,
            page_size: 50,
        }
    }
}

/// Identifiers of one channel's uploads on the target date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelScan {
    /// Channel title reported by the remote, `N/A` if resolution failed.
    pub channel_title: String,
    /// In discovery order, without duplicates.
    pub video_ids: Vec<String>,
    pub pages_fetched: usize,
}

impl ChannelScan {
    fn empty() -> Self {
        Self {
            channel_title: NOT_AVAILABLE.to_string(),
            video_ids: Vec::new(),
            pages_fetched: 0,
        }
    }
}

/// Walks a channel's uploads listing, newest first, collecting the target day's videos.
pub struct UploadScanner<'a> {
    api: &'a dyn VideoApi,
    fetcher: &'a RetryingFetcher,
    settings: ScanSettings,
}

impl<'a> UploadScanner<'a> {
    pub fn new(api: &'a dyn VideoApi, fetcher: &'a RetryingFetcher, settings: ScanSettings) -> Self {
        Self {
            api,
            fetcher,
            settings,
        }
    }

    /// Never fails: resolution problems yield an empty scan, and a failed page ends
    /// the walk with whatever was collected before it.
    ///
    /// Assumes the listing is strictly reverse-chronological. The first item older
    /// than `target` stops the walk, so out-of-order items can hide later matches.
    pub async fn scan(&self, channel_id: &str, target: NaiveDate) -> ChannelScan {
        let uploads = match self
            .fetcher
            .call("resolve channel", || self.api.resolve_channel(channel_id))
            .await
        {
            Ok(Some(uploads)) => uploads,
            Ok(None) => {
                collector_warn!("channel id {channel_id} is unknown to the remote");
                return ChannelScan::empty();
            }
            Err(err) => {
                collector_error!("could not resolve uploads playlist for {channel_id}: {err}");
                return ChannelScan::empty();
            }
        };

        let mut seen = HashSet::new();
        let mut video_ids = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages_fetched = 0;

        while pages_fetched < self.settings.max_pages {
            let page = match self
                .fetcher
                .call("list uploads page", || {
                    self.api.list_uploads_page(
                        &uploads.playlist_id,
                        page_token.as_deref(),
                        self.settings.page_size,
                    )
                })
                .await
            {
                Ok(page) => page,
                Err(err) => {
                    collector_error!(
                        "stopping pagination after {pages_fetched} page(s), keeping {} id(s): {err}",
                        video_ids.len()
                    );
                    break;
                }
            };
            pages_fetched += 1;

            if page.items.is_empty() {
                break;
            }

            let selection = select_page(&page, target);
            if selection.skipped > 0 {
                collector_warn!(
                    "skipped {} listing item(s) without id or valid publish time",
                    selection.skipped
                );
            }
            for id in selection.matched {
                if seen.insert(id.clone()) {
                    video_ids.push(id);
                }
            }
            if selection.reached_older {
                collector_debug!("reached uploads older than {target} on page {pages_fetched}");
                break;
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
            if pages_fetched == self.settings.max_pages {
                collector_info!(
                    "page ceiling of {} reached; remaining pages not fetched",
                    self.settings.max_pages
                );
            }
        }

        ChannelScan {
            channel_title: uploads.channel_title,
            video_ids,
            pages_fetched,
        }
    }
}
