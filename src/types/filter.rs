use serde::{Deserialize, Serialize};

use super::link::TagSet;

/// Date window applied to `Link::created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    /// Parses the wire value; anything unrecognized means no date filter.
    pub fn parse(value: &str) -> Self {
        match value {
            "today" => DateRange::Today,
            "week" => DateRange::Week,
            "month" => DateRange::Month,
            _ => DateRange::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
        }
    }
}

/// Sort key for the displayed link list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Date,
    Title,
    /// Tag-set cardinality.
    TagCount,
}

impl SortBy {
    /// Parses the wire value. Unknown keys fall back to date ordering.
    pub fn parse(value: &str) -> Self {
        match value {
            "title" => SortBy::Title,
            "tags" => SortBy::TagCount,
            _ => SortBy::Date,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Title => "title",
            SortBy::TagCount => "tags",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn parse(value: &str) -> Self {
        match value {
            "asc" => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// The active search/filter/sort configuration. Client-local, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub search_term: String,
    /// Required tags; a link must carry all of them.
    pub tags: TagSet,
    pub date_range: DateRange,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// How the link collection is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn parse(value: &str) -> Self {
        match value {
            "list" => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}
