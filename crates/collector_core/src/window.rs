use chrono::{DateTime, NaiveDate, Utc};

/// The UTC calendar day before `now`.
pub fn target_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive() - chrono::Duration::days(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub video_id: Option<String>,
    /// `None` when the timestamp was absent or not valid RFC 3339.
    pub published_at: Option<DateTime<Utc>>,
}

/// One page of the uploads listing, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub items: Vec<ListingItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSelection {
    /// Identifiers published on the target date, in listing order.
    pub matched: Vec<String>,
    /// An item older than the target date was seen; later pages cannot match.
    pub reached_older: bool,
    /// Items ignored for lacking an identifier or a usable timestamp.
    pub skipped: usize,
}

/// Pick the items of `page` published on `target`.
///
/// Relies on the listing being in reverse-chronological order: the first item
/// dated before `target` ends the selection, and nothing after it is examined.
pub fn select_page(page: &ListingPage, target: NaiveDate) -> PageSelection {
    let mut selection = PageSelection::default();
    for item in &page.items {
        let Some(published) = item.published_at else {
            selection.skipped += 1;
            continue;
        };
        let day = published.date_naive();
        if day < target {
            selection.reached_older = true;
            break;
        }
        if day > target {
            continue;
        }
        match &item.video_id {
            Some(id) if !id.is_empty() => selection.matched.push(id.clone()),
            _ => selection.skipped += 1,
        }
    }
    selection
}
