//! Pagination core shared by the catalog browser, search results and database views.

pub mod controller;
pub mod error;
pub mod page_size;
pub mod provider;
pub mod sql;
pub mod state;
pub mod table;
pub mod widget;

pub use controller::{
    LoadStatus, ObserverId, PaginationController, PaginationEvent, DEFAULT_PAGE_SIZE,
    DEGRADED_MESSAGE,
};
pub use error::PaginationError;
pub use page_size::PageSizeBinding;
pub use provider::{check_page_bounds, DataProvider, ListProvider};
pub use sql::{SortOrder, SqlFilter, SqlRow, SqlTableProvider};
pub use state::PaginationState;
pub use table::{ProxyModel, TableModel, TableModelProvider};
pub use widget::{
    NavigationIntent, PageButton, PageSizeOption, PaginationView, PaginationWidget,
    WidgetOptions, DEFAULT_PAGE_SIZE_OPTIONS, DEFAULT_PAGE_WINDOW,
};
