//! Headless pagination bar: turns controller state into a renderable view and forwards
//! user intents back to the controller.

use crate::controller::{LoadStatus, PaginationController};
use crate::error::PaginationError;
use crate::provider::DataProvider;
use crate::state::PaginationState;

/// Sizes offered by the page-size selector unless configured otherwise.
/// 每頁筆數選單的預設選項。
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [20, 50, 100, 200];
/// Default number of numbered page buttons.
/// 預設顯示的頁碼按鈕數量。
pub const DEFAULT_PAGE_WINDOW: usize = 7;

/// Display options of the pagination bar.
/// 分頁列的顯示選項。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub show_first_last: bool,
    pub show_goto: bool,
    /// Sizes offered by the page-size selector; empty hides the selector.
    pub page_size_options: Vec<usize>,
    /// Maximum number of numbered page buttons, including the first and last page.
    pub page_window: usize,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            show_first_last: true,
            show_goto: true,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            page_window: DEFAULT_PAGE_WINDOW,
        }
    }
}

/// Numbered page button or an ellipsis between non-adjacent numbers.
/// 頁碼按鈕，或不相鄰頁碼之間的省略符號。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    /// `number` is 1-based.
    Page { number: usize, current: bool },
    Gap,
}

/// Entry of the page-size selector.
/// 每頁筆數選單的一個項目。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeOption {
    pub size: usize,
    pub selected: bool,
}

/// Everything a toolkit needs to draw the pagination bar.
/// 繪製分頁列所需的全部資訊。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page_label: String,
    pub range_label: String,
    /// 1-based.
    pub current_page: usize,
    pub total_pages: usize,
    pub show_first_last: bool,
    pub first_enabled: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
    pub goto_enabled: bool,
    pub pages: Vec<PageButton>,
    pub page_sizes: Vec<PageSizeOption>,
    pub status_message: Option<String>,
}

impl PaginationView {
    /// Renders a view from a state snapshot; observers use this to re-render on notification.
    /// 由狀態快照產生檢視；觀察者收到通知時據此重新繪製。
    pub fn from_state(
        state: &PaginationState,
        status: &LoadStatus,
        options: &WidgetOptions,
    ) -> Self {
        let range_label = if state.is_empty() {
            "No items".to_string()
        } else {
            format!(
                "Showing {}-{} of {}",
                state.start_index() + 1,
                state.end_index(),
                state.total_items()
            )
        };

        let mut page_sizes: Vec<PageSizeOption> = options
            .page_size_options
            .iter()
            .map(|&size| PageSizeOption {
                size,
                selected: size == state.page_size(),
            })
            .collect();
        if !page_sizes.is_empty() && !page_sizes.iter().any(|option| option.selected) {
            // a size stored in settings may not be among the offered ones
            page_sizes.push(PageSizeOption {
                size: state.page_size(),
                selected: true,
            });
            page_sizes.sort_by_key(|option| option.size);
        }

        Self {
            page_label: format!("Page {} of {}", state.display_page(), state.total_pages()),
            range_label,
            current_page: state.display_page(),
            total_pages: state.total_pages(),
            show_first_last: options.show_first_last,
            first_enabled: options.show_first_last && state.has_previous(),
            previous_enabled: state.has_previous(),
            next_enabled: state.has_next(),
            last_enabled: options.show_first_last && state.has_next(),
            goto_enabled: options.show_goto && state.total_pages() > 1,
            pages: page_buttons(
                state.current_page(),
                state.total_pages(),
                options.page_window,
            ),
            page_sizes,
            status_message: status.message().map(str::to_string),
        }
    }

    /// Whether any navigation control is enabled.
    pub fn navigation_enabled(&self) -> bool {
        self.first_enabled
            || self.previous_enabled
            || self.next_enabled
            || self.last_enabled
            || self.goto_enabled
    }
}

/// User actions on the pagination bar.
/// 使用者在分頁列上的操作。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    First,
    Previous,
    Next,
    Last,
    /// Numbered button click, 1-based.
    Page(usize),
    /// Raw text from the goto-page field, 1-based.
    GoTo(String),
    PageSize(usize),
    Refresh,
}

/// Presentation layer bound to a [`PaginationController`]; holds only display options.
/// 綁定控制器的呈現層，只保存顯示選項。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationWidget {
    options: WidgetOptions,
}

impl PaginationWidget {
    pub fn new(options: WidgetOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn render<P: DataProvider>(&self, controller: &PaginationController<P>) -> PaginationView {
        PaginationView::from_state(&controller.state(), controller.status(), &self.options)
    }

    /// Forwards `intent` to the controller. Returns whether the pagination state changed.
    /// 將操作轉交控制器，回傳分頁狀態是否改變。
    pub fn dispatch<P: DataProvider>(
        &self,
        controller: &mut PaginationController<P>,
        intent: NavigationIntent,
    ) -> Result<bool, PaginationError> {
        match intent {
            NavigationIntent::First => Ok(controller.go_to_first_page()),
            NavigationIntent::Previous => Ok(controller.go_to_previous_page()),
            NavigationIntent::Next => Ok(controller.go_to_next_page()),
            NavigationIntent::Last => Ok(controller.go_to_last_page()),
            NavigationIntent::Page(number) => {
                let index = i64::try_from(number).unwrap_or(i64::MAX) - 1;
                Ok(controller.go_to_page(index))
            }
            NavigationIntent::GoTo(text) => {
                let number = parse_page_number(&text)?;
                controller.try_go_to_page(number - 1)
            }
            NavigationIntent::PageSize(size) => controller.set_page_size(size),
            NavigationIntent::Refresh => Ok(controller.refresh()),
        }
    }
}

fn parse_page_number(text: &str) -> Result<usize, PaginationError> {
    let trimmed = text.trim();
    let number: usize = trimmed
        .parse()
        .map_err(|_| PaginationError::InvalidInput(format!("'{trimmed}' is not a page number")))?;
    if number == 0 {
        return Err(PaginationError::InvalidInput(
            "page numbers start at 1".to_string(),
        ));
    }
    Ok(number)
}

/// Buttons for a window of pages around `current` (0-based), always keeping the first and
/// last page and marking skipped runs with [`PageButton::Gap`].
fn page_buttons(current: usize, total_pages: usize, window: usize) -> Vec<PageButton> {
    let button = |index: usize| PageButton::Page {
        number: index + 1,
        current: index == current,
    };
    let window = window.max(3);
    if total_pages <= window {
        return (0..total_pages).map(button).collect();
    }

    let inner = window - 2;
    let last = total_pages - 1;
    let end = (current.saturating_sub(inner / 2).max(1) + inner).min(last);
    let start = end.saturating_sub(inner).max(1);

    let mut buttons = Vec::with_capacity(window + 2);
    buttons.push(button(0));
    if start > 1 {
        buttons.push(PageButton::Gap);
    }
    buttons.extend((start..end).map(button));
    if end < last {
        buttons.push(PageButton::Gap);
    }
    buttons.push(button(last));
    buttons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(buttons: &[PageButton]) -> Vec<Option<usize>> {
        buttons
            .iter()
            .map(|button| match button {
                PageButton::Page { number, .. } => Some(*number),
                PageButton::Gap => None,
            })
            .collect()
    }

    #[test]
    fn small_page_counts_show_every_page() {
        let buttons = page_buttons(1, 3, 7);
        assert_eq!(numbers(&buttons), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            buttons[1],
            PageButton::Page {
                number: 2,
                current: true
            }
        );
    }

    #[test]
    fn window_slides_with_current_page() {
        assert_eq!(
            numbers(&page_buttons(0, 10, 7)),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), None, Some(10)]
        );
        assert_eq!(
            numbers(&page_buttons(5, 10, 7)),
            vec![Some(1), None, Some(4), Some(5), Some(6), Some(7), Some(8), None, Some(10)]
        );
        assert_eq!(
            numbers(&page_buttons(9, 10, 7)),
            vec![Some(1), None, Some(5), Some(6), Some(7), Some(8), Some(9), Some(10)]
        );
    }

    #[test]
    fn goto_text_must_be_a_positive_number() {
        assert_eq!(parse_page_number(" 3 "), Ok(3));
        assert!(matches!(
            parse_page_number("three"),
            Err(PaginationError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_page_number("0"),
            Err(PaginationError::InvalidInput(_))
        ));
    }

    #[test]
    fn unlisted_page_size_is_added_to_selector() {
        let state = PaginationState::new(30, 95).unwrap();
        let view = PaginationView::from_state(&state, &LoadStatus::Ready, &WidgetOptions::default());
        let sizes: Vec<_> = view.page_sizes.iter().map(|option| option.size).collect();
        assert_eq!(sizes, vec![20, 30, 50, 100, 200]);
        assert!(view.page_sizes[1].selected);
    }
}
