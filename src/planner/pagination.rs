//! Validated pagination window
//!
//! `LIMIT` and `OFFSET` are the only values interpolated into SQL text, so
//! they can only be built through the validating constructors here.

use crate::filter::InvalidFilterError;

/// Largest accepted page size
pub const MAX_LIMIT: u32 = 200;

/// Page size when none is given
pub const DEFAULT_LIMIT: u32 = 20;

/// `LIMIT n OFFSET m` with `1 <= n <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: u32,
    offset: u64,
}

impl Pagination {
    pub fn new(limit: u32, offset: u64) -> Result<Self, InvalidFilterError> {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(InvalidFilterError::out_of_range(
                "limit",
                limit.into(),
                1,
                MAX_LIMIT.into(),
            ));
        }
        if i64::try_from(offset).is_err() {
            return Err(InvalidFilterError::new("page", "offset out of range"));
        }
        Ok(Self { limit, offset })
    }

    /// Window for a 1-based page number
    pub fn for_page(page: u32, limit: u32) -> Result<Self, InvalidFilterError> {
        if page == 0 {
            return Err(InvalidFilterError::new("page", "page must be at least 1"));
        }
        let offset = u64::from(page - 1)
            .checked_mul(limit.into())
            .ok_or_else(|| InvalidFilterError::new("page", "offset out of range"))?;
        Self::new(limit, offset)
    }

    /// First `limit` rows, clamped into the accepted range
    pub fn first(limit: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: 0,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// `ceil(total / limit)`
    pub fn total_pages(total: u64, limit: u32) -> u64 {
        if limit == 0 {
            return 0;
        }
        total.div_ceil(u64::from(limit))
    }
}
