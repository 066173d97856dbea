//! Adapters for row-oriented table models and filtering/sorting proxies over them.

use std::cmp::Ordering;
use std::fmt;

use crate::error::PaginationError;
use crate::provider::DataProvider;

/// Row-oriented model as exposed by item views (row count plus row data by index).
/// 以列為單位的資料模型：提供列數與指定列的資料。
pub trait TableModel {
    type Row;

    fn row_count(&self) -> usize;

    /// Data of `row`, or `None` when the row does not exist.
    fn row_data(&self, row: usize) -> Option<Self::Row>;
}

impl<T: Clone> TableModel for Vec<T> {
    type Row = T;

    fn row_count(&self) -> usize {
        self.len()
    }

    fn row_data(&self, row: usize) -> Option<T> {
        self.get(row).cloned()
    }
}

/// Exposes a [`TableModel`] through the [`DataProvider`] contract.
#[derive(Debug, Clone, Default)]
pub struct TableModelProvider<M> {
    model: M,
}

impl<M: TableModel> TableModelProvider<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model; refresh the owning controller after changing rows.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_inner(self) -> M {
        self.model
    }
}

impl<M: TableModel> DataProvider for TableModelProvider<M> {
    type Item = M::Row;

    fn get_total_count(&self) -> Result<usize, PaginationError> {
        Ok(self.model.row_count())
    }

    fn get_page_items(
        &self,
        start_index: usize,
        count: usize,
    ) -> Result<Vec<M::Row>, PaginationError> {
        let rows = self.model.row_count();
        if start_index >= rows {
            return Ok(Vec::new());
        }
        let end = start_index.saturating_add(count).min(rows);
        (start_index..end)
            .map(|row| {
                self.model.row_data(row).ok_or_else(|| {
                    PaginationError::Provider(format!(
                        "row {row} reported by the model has no data"
                    ))
                })
            })
            .collect()
    }
}

type RowFilter<R> = Box<dyn Fn(&R) -> bool>;
type RowComparator<R> = Box<dyn Fn(&R, &R) -> Ordering>;

/// Filtering and sorting view over a source model.
///
/// Keeps a mapping from proxy rows to source rows. The mapping is rebuilt whenever the
/// filter or sort changes; after mutating the source directly call [`ProxyModel::invalidate`].
pub struct ProxyModel<M: TableModel> {
    source: M,
    filter: Option<RowFilter<M::Row>>,
    comparator: Option<RowComparator<M::Row>>,
    mapping: Vec<usize>,
}

impl<M: TableModel> ProxyModel<M> {
    pub fn new(source: M) -> Self {
        let mut proxy = Self {
            source,
            filter: None,
            comparator: None,
            mapping: Vec::new(),
        };
        proxy.invalidate();
        proxy
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut M {
        &mut self.source
    }

    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: Fn(&M::Row) -> bool + 'static,
    {
        self.filter = Some(Box::new(filter));
        self.invalidate();
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.invalidate();
    }

    pub fn set_sort<F>(&mut self, comparator: F)
    where
        F: Fn(&M::Row, &M::Row) -> Ordering + 'static,
    {
        self.comparator = Some(Box::new(comparator));
        self.invalidate();
    }

    pub fn clear_sort(&mut self) {
        self.comparator = None;
        self.invalidate();
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    /// Source row backing `proxy_row`.
    pub fn map_to_source(&self, proxy_row: usize) -> Option<usize> {
        self.mapping.get(proxy_row).copied()
    }

    /// Recomputes the proxy-to-source mapping from the current source rows.
    pub fn invalidate(&mut self) {
        let mut accepted: Vec<(usize, M::Row)> = (0..self.source.row_count())
            .filter_map(|row| self.source.row_data(row).map(|data| (row, data)))
            .filter(|(_, data)| self.filter.as_ref().map_or(true, |accept| accept(data)))
            .collect();
        if let Some(compare) = &self.comparator {
            // stable: equal rows keep source order
            accepted.sort_by(|a, b| compare(&a.1, &b.1));
        }
        self.mapping = accepted.into_iter().map(|(row, _)| row).collect();
    }
}

impl<M: TableModel> TableModel for ProxyModel<M> {
    type Row = M::Row;

    fn row_count(&self) -> usize {
        self.mapping.len()
    }

    fn row_data(&self, row: usize) -> Option<M::Row> {
        self.map_to_source(row)
            .and_then(|source_row| self.source.row_data(source_row))
    }
}

impl<M: TableModel + fmt::Debug> fmt::Debug for ProxyModel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyModel")
            .field("source", &self.source)
            .field("filtered", &self.filter.is_some())
            .field("sorted", &self.comparator.is_some())
            .field("rows", &self.mapping.len())
            .finish()
    }
}
