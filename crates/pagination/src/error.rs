use thiserror::Error;

/// Errors raised by pagination state, providers and the controller.
/// 分頁狀態、資料來源與控制器可能產生的錯誤。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page size must be greater than zero")]
    InvalidPageSize,
    #[error("page index {page} is outside the valid range 0..{total_pages}")]
    InvalidPage { page: usize, total_pages: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("data provider failed: {0}")]
    Provider(String),
    #[error("start index {start_index} is beyond the {total_count} available items")]
    OutOfRange {
        start_index: usize,
        total_count: usize,
    },
}

impl PaginationError {
    /// Validation failures are reported to the caller and never broadcast to observers.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PaginationError::InvalidPageSize
                | PaginationError::InvalidPage { .. }
                | PaginationError::InvalidInput(_)
        )
    }
}

impl From<rusqlite::Error> for PaginationError {
    fn from(err: rusqlite::Error) -> Self {
        PaginationError::Provider(err.to_string())
    }
}
