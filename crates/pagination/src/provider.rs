//! Data providers: the capability a paginated view needs from its backing store.

use crate::error::PaginationError;

/// Supplies the item count and page slices of an underlying dataset.
/// 提供資料總數與分頁切片的資料來源介面。
pub trait DataProvider {
    type Item;

    /// Current number of items, after any filter the provider applies.
    /// 目前的項目總數（已套用資料來源的篩選）。
    fn get_total_count(&self) -> Result<usize, PaginationError>;

    /// Returns at most `count` items starting at `start_index`, in a stable order.
    /// 自 `start_index` 起依穩定順序回傳至多 `count` 筆項目。
    ///
    /// A start index at or past the end yields an empty page rather than an error, so a
    /// caller holding a stale state after the data shrank still gets a usable answer.
    fn get_page_items(
        &self,
        start_index: usize,
        count: usize,
    ) -> Result<Vec<Self::Item>, PaginationError>;
}

impl<T> DataProvider for Box<dyn DataProvider<Item = T>> {
    type Item = T;

    fn get_total_count(&self) -> Result<usize, PaginationError> {
        (**self).get_total_count()
    }

    fn get_page_items(&self, start_index: usize, count: usize) -> Result<Vec<T>, PaginationError> {
        (**self).get_page_items(start_index, count)
    }
}

/// Rejects a slice request that starts beyond a non-empty dataset.
/// 拒絕起點超出非空資料集的切片請求。
///
/// Providers that cannot serve stale requests cheaply use this to report
/// [`PaginationError::OutOfRange`]; the controller treats it as an empty page.
pub fn check_page_bounds(start_index: usize, total_count: usize) -> Result<(), PaginationError> {
    if total_count > 0 && start_index >= total_count {
        return Err(PaginationError::OutOfRange {
            start_index,
            total_count,
        });
    }
    Ok(())
}

/// Collection-backed provider over an owned list.
/// 以自有清單為後端的資料來源。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProvider<T> {
    items: Vec<T>,
}

impl<T> ListProvider<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replaces the backing list. Call `refresh` on the owning controller afterwards.
    /// 替換整份清單；之後需呼叫控制器的 `refresh`。
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> From<Vec<T>> for ListProvider<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Clone> DataProvider for ListProvider<T> {
    type Item = T;

    fn get_total_count(&self) -> Result<usize, PaginationError> {
        Ok(self.items.len())
    }

    fn get_page_items(&self, start_index: usize, count: usize) -> Result<Vec<T>, PaginationError> {
        if start_index >= self.items.len() {
            return Ok(Vec::new());
        }
        let end = start_index.saturating_add(count).min(self.items.len());
        Ok(self.items[start_index..end].to_vec())
    }
}
