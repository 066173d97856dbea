use std::ops::Range;

use crate::error::PaginationError;

/// Immutable snapshot of a paginated view.
/// 分頁檢視的不可變快照。
///
/// Every navigation or data change produces a new value; `current_page` always stays inside
/// `0..total_pages()`, and an empty dataset still has a single (empty) page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl PaginationState {
    /// Creates a state positioned on the first page.
    /// 建立位於第一頁的狀態。
    pub fn new(page_size: usize, total_items: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::InvalidPageSize);
        }
        Ok(Self {
            current_page: 0,
            page_size,
            total_items,
        })
    }

    /// State describing a dataset with no items.
    /// 沒有任何項目時的狀態。
    pub fn empty(page_size: usize) -> Result<Self, PaginationError> {
        Self::new(page_size, 0)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages, never less than one.
    /// 總頁數，至少為一。
    pub fn total_pages(&self) -> usize {
        if self.total_items == 0 {
            1
        } else {
            self.total_items.div_ceil(self.page_size)
        }
    }

    pub fn last_page(&self) -> usize {
        self.total_pages() - 1
    }

    /// Index of the first item on the current page.
    /// 目前頁面第一個項目的索引。
    pub fn start_index(&self) -> usize {
        self.current_page * self.page_size
    }

    /// Exclusive end of the current page, bounded by the item count.
    /// 目前頁面的結束索引（不含），不超過項目總數。
    pub fn end_index(&self) -> usize {
        (self.start_index() + self.page_size).min(self.total_items)
    }

    pub fn item_range(&self) -> Range<usize> {
        self.start_index()..self.end_index()
    }

    /// Number of items expected on the current page.
    pub fn page_item_count(&self) -> usize {
        self.end_index().saturating_sub(self.start_index())
    }

    /// Current page as shown to users (1-based).
    pub fn display_page(&self) -> usize {
        self.current_page + 1
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn is_first_page(&self) -> bool {
        !self.has_previous()
    }

    pub fn is_last_page(&self) -> bool {
        !self.has_next()
    }

    /// Moves to `page`, clamped into the valid range.
    /// 移動至指定頁面，超出範圍時自動夾限。
    pub fn with_page(self, page: usize) -> Self {
        Self {
            current_page: page.min(self.last_page()),
            ..self
        }
    }

    /// Replaces the item count, clamping the current page if it no longer exists.
    /// 更新項目總數；若目前頁面不再存在則夾限至最後一頁。
    pub fn with_total_items(self, total_items: usize) -> Self {
        let next = Self {
            total_items,
            ..self
        };
        next.with_page(self.current_page)
    }

    /// Replaces the page size, clamping the current page to the last valid one.
    /// 更新每頁筆數，並將目前頁面夾限至最後有效頁。
    pub fn with_page_size(self, page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::InvalidPageSize);
        }
        let next = Self { page_size, ..self };
        Ok(next.with_page(self.current_page))
    }
}
