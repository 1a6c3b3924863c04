use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Wire format for every content date.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted entry formats, tried in order. Slash and dash day-first forms
/// come before anything month-first.
const DATE_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Normalize a user- or server-supplied date to `YYYY-MM-DD`.
pub fn normalize_date(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_field("date", "Date is required"));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive().format(WIRE_DATE_FORMAT).to_string());
    }
    // "2024-03-10T00:00:00" and similar without an offset
    if trimmed.len() > 10 && trimmed.as_bytes().get(10) == Some(&b'T') {
        if let Ok(date) = NaiveDate::parse_from_str(&trimmed[..10], WIRE_DATE_FORMAT) {
            return Ok(date.format(WIRE_DATE_FORMAT).to_string());
        }
    }
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.format(WIRE_DATE_FORMAT).to_string())
        .ok_or_else(|| {
            AppError::invalid_field("date", format!("\"{trimmed}\" is not a valid date"))
        })
}

/// Pagination metadata for client-side paged tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    /// `page` is 1-based and clamped into range.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);
        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index range of the current page within the full row set.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total);
        start.min(end)..end
    }
}
