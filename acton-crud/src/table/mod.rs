//! Resource table columns and pagination

pub mod column;

pub use column::{resolve_column_kind, resolve_columns, Cell, Column, DisplayKind};

use serde::Serialize;

use crate::error::{CrudError, Result};

/// Header of the trailing column holding row actions (edit, destroy)
pub const ACTIONS_COLUMN: &str = "actions";

/// Caller-supplied pagination, echoed to the View Layer
///
/// Page counts are computed by the caller, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    page: usize,
    per_page: usize,
    page_count: usize,
}

impl Pagination {
    /// Create pagination; `per_page` must be positive
    ///
    /// # Examples
    ///
    /// ```rust
    /// use acton_crud::table::Pagination;
    ///
    /// let pagination = Pagination::new(0, 25, 4).unwrap();
    /// assert_eq!(pagination.per_page(), 25);
    /// assert!(Pagination::new(0, 0, 4).is_err());
    /// ```
    pub fn new(page: usize, per_page: usize, page_count: usize) -> Result<Self> {
        if per_page == 0 {
            return Err(CrudError::Config("per_page must be greater than zero".into()));
        }
        Ok(Self {
            page,
            per_page,
            page_count,
        })
    }

    /// First page of an unknown-length listing; a zero page size becomes one
    #[must_use]
    pub fn first_page(per_page: usize) -> Self {
        Self {
            page: 0,
            per_page: per_page.max(1),
            page_count: 0,
        }
    }

    /// Current zero-based page
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Items per page
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// Total number of pages
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }
}
