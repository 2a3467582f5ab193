use serde::Serialize;
use utoipa::ToSchema;

use super::errors::DomainError;

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_PAGE_SIZE: i64 = 25;
pub const MAX_PAGE_SIZE: i64 = 1000;

/// A zero-based page index plus a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page_index: i64, page_size: i64) -> Result<Self, DomainError> {
        if page_index < 0 {
            return Err(DomainError::InvalidArgument(
                "page index must not be negative".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(DomainError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            page_index,
            page_size,
        })
    }

    /// Build a request from caller-facing, 1-based paging parameters.
    ///
    /// A missing or non-positive page number selects the first page. A missing
    /// page size selects [`DEFAULT_PAGE_SIZE`]; larger sizes are capped at
    /// [`MAX_PAGE_SIZE`].
    pub fn from_params(page_number: Option<i64>, page_size: Option<i64>) -> Result<Self, DomainError> {
        let page_index = match page_number {
            Some(n) if n > 0 => n - 1,
            _ => DEFAULT_PAGE,
        };
        let page_size = match page_size {
            None => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
        };
        Self::new(page_index, page_size)
    }

    /// Rows to skip. Saturates, so a page far past the end is simply empty.
    pub fn offset(&self) -> i64 {
        self.page_index.saturating_mul(self.page_size)
    }
}

/// One slice of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    /// 1-based, matching the `pageNumber` request parameter.
    pub page_number: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let total_pages = (total_elements + request.page_size - 1) / request.page_size;
        Self {
            content,
            total_elements,
            total_pages,
            page_number: request.page_index.saturating_add(1),
            page_size: request.page_size,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}
