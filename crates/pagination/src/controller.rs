use std::fmt;

use crate::error::PaginationError;
use crate::page_size::PageSizeBinding;
use crate::provider::DataProvider;
use crate::state::PaginationState;

/// Page size used when nothing has been persisted for a view.
/// 尚未保存任何設定時使用的每頁筆數。
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Message shown by views while the provider is failing.
/// 資料來源失敗時檢視顯示的訊息。
pub const DEGRADED_MESSAGE: &str = "Unable to load data";

/// Health of the data behind the controller.
/// 控制器背後資料的載入狀態。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Ready,
    /// The provider failed; the controller keeps its last valid state.
    Degraded { message: String },
}

impl LoadStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadStatus::Degraded { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadStatus::Ready => None,
            LoadStatus::Degraded { message } => Some(message.as_str()),
        }
    }
}

/// Notification delivered to observers, in the order transitions were applied.
/// 依狀態轉換順序傳送給觀察者的通知。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationEvent {
    StateChanged(PaginationState),
    StatusChanged(LoadStatus),
}

/// Handle returned by [`PaginationController::subscribe`].
/// 訂閱觀察者時回傳的識別碼。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&PaginationEvent)>;

/// Mediates navigation requests against a [`DataProvider`] and tracks the current page.
/// 依據資料來源處理換頁請求並追蹤目前頁面的控制器。
///
/// All calls are expected on the UI thread. Observers run synchronously inside the
/// transition that triggered them, in registration order.
pub struct PaginationController<P: DataProvider> {
    provider: P,
    state: PaginationState,
    status: LoadStatus,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
    page_size_binding: Option<PageSizeBinding>,
}

impl<P: DataProvider> PaginationController<P> {
    /// Creates a controller on the first page and loads the provider's item count.
    /// 建立位於第一頁的控制器並載入項目總數。
    pub fn new(provider: P, page_size: usize) -> Result<Self, PaginationError> {
        let state = PaginationState::empty(page_size)?;
        let mut controller = Self {
            provider,
            state,
            status: LoadStatus::Ready,
            observers: Vec::new(),
            next_observer: 0,
            page_size_binding: None,
        };
        if let Some(total) = controller.query_total_count() {
            controller.state = controller.state.with_total_items(total);
        }
        Ok(controller)
    }

    /// Creates a controller whose page size is read from and written to the settings service.
    /// 建立每頁筆數由設定服務讀寫的控制器。
    ///
    /// `default_page_size` applies when no valid size has been stored yet.
    pub fn with_settings(
        provider: P,
        default_page_size: usize,
        binding: PageSizeBinding,
    ) -> Result<Self, PaginationError> {
        if default_page_size == 0 {
            return Err(PaginationError::InvalidPageSize);
        }
        let page_size = binding.load().unwrap_or(default_page_size);
        let mut controller = Self::new(provider, page_size)?;
        controller.page_size_binding = Some(binding);
        Ok(controller)
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider. Call [`refresh`](Self::refresh) after changing its data.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn page_size_binding(&self) -> Option<&PageSizeBinding> {
        self.page_size_binding.as_ref()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&PaginationEvent) + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Moves to `page`, clamped into `0..total_pages`. Returns whether the state changed.
    /// 移動至指定頁面並夾限於有效範圍，回傳狀態是否改變。
    pub fn go_to_page(&mut self, page: i64) -> bool {
        let target = clamp_page(page, self.state.last_page());
        self.navigate(target)
    }

    /// Strict variant of [`go_to_page`](Self::go_to_page) for user-typed page indices.
    pub fn try_go_to_page(&mut self, page: usize) -> Result<bool, PaginationError> {
        let total_pages = self.state.total_pages();
        if page >= total_pages {
            return Err(PaginationError::InvalidPage { page, total_pages });
        }
        Ok(self.navigate(page))
    }

    pub fn go_to_first_page(&mut self) -> bool {
        self.navigate(0)
    }

    pub fn go_to_last_page(&mut self) -> bool {
        self.navigate(self.state.last_page())
    }

    /// Advances one page; a no-op on the last page.
    pub fn go_to_next_page(&mut self) -> bool {
        if !self.state.has_next() {
            return false;
        }
        self.navigate(self.state.current_page() + 1)
    }

    /// Steps back one page; a no-op on the first page.
    pub fn go_to_previous_page(&mut self) -> bool {
        if !self.state.has_previous() {
            return false;
        }
        self.navigate(self.state.current_page() - 1)
    }

    /// Changes the page size, keeping the current page within range.
    /// 變更每頁筆數，並讓目前頁面維持在有效範圍內。
    ///
    /// A zero size is rejected without touching the state or notifying observers.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<bool, PaginationError> {
        let mut next = self.state.with_page_size(page_size)?;
        if let Some(binding) = &self.page_size_binding {
            binding.save(page_size);
        }
        if let Some(total) = self.query_total_count() {
            next = next.with_total_items(total);
        }
        Ok(self.apply_state(next))
    }

    /// Re-reads the item count, clamping the current page if the data shrank.
    /// 重新讀取項目總數；資料減少時夾限目前頁面。
    ///
    /// Notifies only when the state actually changed.
    pub fn refresh(&mut self) -> bool {
        match self.query_total_count() {
            Some(total) => self.apply_state(self.state.with_total_items(total)),
            None => false,
        }
    }

    /// Swaps the provider, returning the previous one, and resets to the first page.
    /// 替換資料來源並回傳舊的來源，同時回到第一頁。
    ///
    /// Always notifies, even when the new state equals the old one.
    pub fn set_data_provider(&mut self, provider: P) -> P {
        let previous = std::mem::replace(&mut self.provider, provider);
        let total = self.query_total_count().unwrap_or(0);
        let next = self.state.with_page(0).with_total_items(total);
        log::debug!(
            "pagination: provider swapped, {} items over {} pages",
            next.total_items(),
            next.total_pages()
        );
        self.state = next;
        self.emit(PaginationEvent::StateChanged(next));
        previous
    }

    /// Items of the current page. Provider failures degrade to an empty page.
    /// 取得目前頁面的項目；資料來源失敗時回傳空頁。
    pub fn current_page_items(&mut self) -> Vec<P::Item> {
        if self.state.is_empty() {
            return Vec::new();
        }
        let start = self.state.start_index();
        match self.provider.get_page_items(start, self.state.page_size()) {
            Ok(items) => {
                self.mark_ready();
                items
            }
            Err(PaginationError::OutOfRange {
                start_index,
                total_count,
            }) => {
                log::debug!(
                    "pagination: stale page request at {start_index} of {total_count} items"
                );
                // the provider answered, so it is reachable again
                self.mark_ready();
                Vec::new()
            }
            Err(err) => {
                self.mark_degraded(&err);
                Vec::new()
            }
        }
    }

    fn navigate(&mut self, target: usize) -> bool {
        if target == self.state.current_page() {
            return false;
        }
        let mut next = self.state;
        if let Some(total) = self.query_total_count() {
            next = next.with_total_items(total);
        }
        self.apply_state(next.with_page(target))
    }

    fn query_total_count(&mut self) -> Option<usize> {
        match self.provider.get_total_count() {
            Ok(total) => {
                self.mark_ready();
                Some(total)
            }
            Err(err) => {
                self.mark_degraded(&err);
                None
            }
        }
    }

    fn apply_state(&mut self, next: PaginationState) -> bool {
        if next == self.state {
            return false;
        }
        log::debug!(
            "pagination: page {}/{} (size {}, {} items)",
            next.display_page(),
            next.total_pages(),
            next.page_size(),
            next.total_items()
        );
        self.state = next;
        self.emit(PaginationEvent::StateChanged(next));
        true
    }

    fn mark_ready(&mut self) {
        if self.status.is_degraded() {
            log::info!("pagination: provider recovered");
            self.set_status(LoadStatus::Ready);
        }
    }

    fn mark_degraded(&mut self, err: &PaginationError) {
        log::warn!("pagination: provider failed: {err}");
        self.set_status(LoadStatus::Degraded {
            message: DEGRADED_MESSAGE.to_string(),
        });
    }

    fn set_status(&mut self, status: LoadStatus) {
        if self.status == status {
            return;
        }
        self.status = status.clone();
        self.emit(PaginationEvent::StatusChanged(status));
    }

    fn emit(&mut self, event: PaginationEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

impl<P: DataProvider + fmt::Debug> fmt::Debug for PaginationController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationController")
            .field("provider", &self.provider)
            .field("state", &self.state)
            .field("status", &self.status)
            .field("observers", &self.observers.len())
            .field("page_size_binding", &self.page_size_binding)
            .finish()
    }
}

fn clamp_page(page: i64, last_page: usize) -> usize {
    if page <= 0 {
        return 0;
    }
    usize::try_from(page).map_or(last_page, |page| page.min(last_page))
}
