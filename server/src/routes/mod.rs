//! Request handlers, grouped by resource.

pub mod converter;
pub mod export;
pub mod todos;

use crate::error::ApiError;

/// Largest accepted `page_size` for any listing endpoint.
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

pub(crate) fn check_paging(page: u32, page_size: u32) -> Result<(), ApiError> {
    if page < 1 {
        return Err(ApiError::BadRequest("page must be at least 1".to_string()));
    }
    if page_size < 1 || page_size > MAX_PAGE_SIZE {
        return Err(ApiError::BadRequest(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

pub(crate) fn offset(page: u32, page_size: u32) -> i64 {
    i64::from(page - 1) * i64::from(page_size)
}
