//! Page/size validation and offset computation.

use crate::config::limits;
use crate::error::{ApiError, ApiResult};

/// A validated result window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Hits to return.
    pub limit: u32,
    /// Hits to skip.
    pub offset: u64,
}

/// Validate `page`/`page_size` and convert them into a `(limit, offset)` window.
///
/// `page` has no upper bound; an offset past the end of the results yields an empty
/// page from the engine.
///
/// # Errors
///
/// Returns a validation error when `page < 1`, when `page_size` is outside
/// `1..=1000`, or when the offset does not fit in 64 bits.
pub fn resolve(page: i64, page_size: i64) -> ApiResult<Page> {
    if page < 1 {
        return Err(ApiError::validation("page", "must be greater than or equal to 1"));
    }
    if !(1..=limits::MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::validation(
            "size",
            format!("must be between 1 and {}", limits::MAX_PAGE_SIZE),
        ));
    }

    let offset = (page - 1)
        .checked_mul(page_size)
        .ok_or_else(|| ApiError::validation("page", "is too large"))?;

    Ok(Page { limit: page_size as u32, offset: offset as u64 })
}
