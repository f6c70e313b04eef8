use crate::{model::api::PaginationDto, server::error::AppError};

pub const DEFAULT_LIMIT: u64 = 20;

/// Validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageParams {
    pub page: u64,
    pub limit: u64,
}

impl PageParams {
    /// Applies defaults (page 1, limit 20) and bounds `limit` to `1..=max_limit`.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - page is 0 or limit is outside the allowed range
    pub fn new(page: Option<u64>, limit: Option<u64>, max_limit: u64) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err(AppError::BadRequest("page must be at least 1".to_string()));
        }
        if limit < 1 || limit > max_limit {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {}",
                max_limit
            )));
        }

        Ok(Self { page, limit })
    }

    /// Zero-indexed page number for SeaORM paginators.
    pub fn page_index(&self) -> u64 {
        self.page - 1
    }
}

/// One page of domain rows with the total number of matching rows.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub params: PageParams,
}

impl<T> Page<T> {
    pub fn pagination(&self) -> PaginationDto {
        PaginationDto::new(self.params.page, self.params.limit, self.total)
    }
}
