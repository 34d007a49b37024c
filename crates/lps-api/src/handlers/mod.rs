//! HTTP handlers, one module per resource.

pub mod health;
pub mod templates;
pub mod videos;
pub mod workflows;

use lps_core::AppError;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// `(limit, offset)` for a 1-based `page` of `page_size` rows.
pub(crate) fn page_window(page: Option<i64>, page_size: Option<i64>) -> Result<(i64, i64), AppError> {
    let page = page.unwrap_or(1);
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page < 1 {
        return Err(AppError::InvalidInput("page must be at least 1".to_string()));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(AppError::InvalidInput(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok((page_size, (page - 1) * page_size))
}
