//! Pagination types for list endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::config::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PAGE_PARAM, PER_PAGE_PARAM,
};
use crate::domain::{ErrorRecord, UserResponse};
use crate::errors::ApiError;

/// Pagination query parameters (reusable across all list endpoints)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub per_page: u64,
}

impl PaginationParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Read `page` and `per_page` from raw query parameters.
    ///
    /// Missing or empty values fall back to the defaults. Non-numeric or zero
    /// values are rejected with `INVALID_DATA`.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, ApiError> {
        let page = parse_positive(query, PAGE_PARAM, DEFAULT_PAGE_NUMBER)?;
        let per_page = parse_positive(query, PER_PAGE_PARAM, DEFAULT_PAGE_SIZE)?;
        Ok(Self { page, per_page })
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }
}

fn parse_positive(
    query: &HashMap<String, String>,
    key: &str,
    default: u64,
) -> Result<u64, ApiError> {
    let raw = match query.get(key).map(|v| v.trim()) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(default),
    };

    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ApiError::invalid_data(json!({
            key: [format!("must be a positive integer, got '{}'", raw)]
        }))),
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus count metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[aliases(UserPage = Paginated<UserResponse>, ErrorPage = Paginated<ErrorRecord>)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Number of pages needed for `total` items, `0` when there are none
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page > 0 {
        total.div_ceil(per_page)
    } else {
        0
    }
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
                total_pages: total_pages(total, per_page),
            },
        }
    }

    /// Convert every item, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
