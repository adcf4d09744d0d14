//! Shared query parameter types for API handlers.

use serde::Deserialize;
use stackit_core::pagination::{clamp_limit, clamp_page};

/// Page-based pagination parameters (`?page=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Resolve to a concrete `(page, limit)` pair.
    pub fn resolve(&self, default_limit: i64, max_limit: i64) -> (i64, i64) {
        (
            clamp_page(self.page),
            clamp_limit(self.limit, default_limit, max_limit),
        )
    }
}

/// `?limit=` only, for feeds that have no paging.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
