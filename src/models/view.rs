//! View pipeline request/response models
//!
//! A [`ViewQuery`] describes what a list page wants to see; a [`ViewResult`]
//! is the page of records it gets back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{DashboardError, DashboardResult};

/// Filter value meaning "no constraint on this field"
pub const ALL_FILTER: &str = "All";

pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Query parameters for a list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    /// Free text, matched case-insensitively against `search_fields`
    pub search_text: String,
    /// Text fields the search is run against (OR across fields)
    pub search_fields: Vec<String>,
    /// Field -> expected value (AND across entries)
    pub equality_filters: BTreeMap<String, String>,
    /// 1-indexed page number; clamped, never rejected
    pub page: i32,
    pub page_size: i32,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewQuery {
    pub fn new(page_size: i32) -> Self {
        Self {
            search_text: String::new(),
            search_fields: Vec::new(),
            equality_filters: BTreeMap::new(),
            page: 1,
            page_size,
        }
    }

    pub fn searching<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the search text. Resets to the first page.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self.page = 1;
        self
    }

    /// Constrain `field` to `value` (or lift the constraint with [`ALL_FILTER`]).
    /// Resets to the first page.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.equality_filters.insert(field.into(), value.into());
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: i32) -> Self {
        self.page = page;
        self
    }

    /// Trimmed, lower-cased search text, or `None` when the search is blank
    pub fn normalized_search(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// Filters that actually constrain something
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.equality_filters
            .iter()
            .filter(|(_, value)| value.as_str() != ALL_FILTER)
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    pub fn validate(&self) -> DashboardResult<()> {
        validate_page_size(self.page_size)
    }
}

pub fn validate_page_size(page_size: i32) -> DashboardResult<()> {
    if page_size <= 0 {
        return Err(DashboardError::configuration(format!(
            "page size must be positive, got {}",
            page_size
        )));
    }
    Ok(())
}

/// One page of filtered records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResult<T> {
    pub items: Vec<T>,
    pub total_filtered_count: usize,
    /// 0 when nothing matched
    pub total_pages: usize,
    pub current_page: usize,
}

impl<T> ViewResult<T> {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Non-fatal message shown above a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Error,
            message: message.into(),
        }
    }
}
