//! Pagination types for the detail listing.

use serde::Serialize;

/// Rows returned when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: u64 = 1000;

/// Limit/offset window for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of rows to return.
    pub limit: u64,
    /// Number of rows to skip.
    pub offset: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Creates a page request from an explicit window.
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Builds a page request from raw query-string values.
    ///
    /// Missing or unparseable values take their default; negative values
    /// are clamped to zero.
    #[must_use]
    pub fn from_raw(limit: Option<&str>, offset: Option<&str>) -> Self {
        Self {
            limit: coerce_non_negative(limit).unwrap_or(DEFAULT_LIMIT),
            offset: coerce_non_negative(offset).unwrap_or(0),
        }
    }
}

fn coerce_non_negative(raw: Option<&str>) -> Option<u64> {
    let value = raw?.trim().parse::<i64>().ok()?;
    Some(u64::try_from(value).unwrap_or(0))
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of rows matching the filter.
    pub total: u64,
    /// Requested limit.
    pub limit: u64,
    /// Requested offset.
    pub offset: u64,
    /// Whether rows remain after this page.
    pub has_more: bool,
}

impl PageMeta {
    /// Computes metadata for a page that returned `returned` rows.
    #[must_use]
    pub fn new(request: PageRequest, returned: usize, total: u64) -> Self {
        let returned = u64::try_from(returned).unwrap_or(u64::MAX);
        Self {
            total,
            limit: request.limit,
            offset: request.offset,
            has_more: request.offset.saturating_add(returned) < total,
        }
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    /// The rows in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let pagination = PageMeta::new(request, data.len(), total);
        Self { data, pagination }
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
