//! Link Filter/Sort Engine for Linkstash.
//!
//! Pure functions deriving the displayed subset of a link collection from
//! the active `FilterSpec`. Inputs are never mutated.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Months, Utc};

use crate::types::filter::{DateRange, FilterSpec, SortBy, SortOrder};
use crate::types::link::Link;

/// Applies the filter stages in order — text, required tags, date window —
/// and sorts the survivors. `now` anchors the date windows.
pub fn filter_links(links: &[Link], spec: &FilterSpec, now: DateTime<Utc>) -> Vec<Link> {
    let term = spec.search_term.trim().to_lowercase();

    let mut result: Vec<Link> = links
        .iter()
        .filter(|link| term.is_empty() || matches_search(link, &term))
        .filter(|link| link.tags.contains_all(&spec.tags))
        .filter(|link| in_date_range(link.created_at, spec.date_range, now))
        .cloned()
        .collect();

    sort_links(&mut result, spec.sort_by, spec.sort_order);
    result
}

/// Case-insensitive containment over title, description, and tags.
fn matches_search(link: &Link, term_lower: &str) -> bool {
    link.title.to_lowercase().contains(term_lower)
        || link.description.to_lowercase().contains(term_lower)
        || link
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(term_lower))
}

/// Date-window check. `today` means the same UTC calendar date; `week` and
/// `month` are trailing windows anchored at `now`.
fn in_date_range(created_at: i64, range: DateRange, now: DateTime<Utc>) -> bool {
    match range {
        DateRange::All => true,
        DateRange::Today => DateTime::from_timestamp(created_at, 0)
            .map(|created| created.date_naive() == now.date_naive())
            .unwrap_or(false),
        DateRange::Week => created_at >= (now - Duration::days(7)).timestamp(),
        DateRange::Month => match now.checked_sub_months(Months::new(1)) {
            Some(cutoff) => created_at >= cutoff.timestamp(),
            None => true,
        },
    }
}

/// Stable sort by the requested key and direction.
pub fn sort_links(links: &mut [Link], sort_by: SortBy, order: SortOrder) {
    links.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::Date => a.created_at.cmp(&b.created_at),
            SortBy::Title => compare_titles(&a.title, &b.title),
            SortBy::TagCount => a.tags.len().cmp(&b.tags.len()),
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Case-insensitive lexicographic comparison, so "Apple" sorts before
/// "banana". Equal folded titles fall back to a byte comparison.
fn compare_titles(a: &str, b: &str) -> Ordering {
    match a.to_lowercase().cmp(&b.to_lowercase()) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}
