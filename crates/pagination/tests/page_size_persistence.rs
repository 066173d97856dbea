use std::cell::RefCell;
use std::rc::Rc;

use rustpo_pagination::{
    ListProvider, PageSizeBinding, PaginationController, PaginationError, DEFAULT_PAGE_SIZE,
};
use rustpo_settings::{JsonSettingsStore, MemorySettings, SettingsStore};
use tempfile::tempdir;

fn provider() -> ListProvider<u32> {
    ListProvider::new((0..500).collect())
}

#[test]
fn default_applies_when_nothing_is_stored() {
    let settings = Rc::new(RefCell::new(MemorySettings::new()));
    let binding = PageSizeBinding::new("catalog", settings.clone());
    let controller =
        PaginationController::with_settings(provider(), DEFAULT_PAGE_SIZE, binding).unwrap();

    assert_eq!(controller.state().page_size(), 50);
    assert!(settings.borrow().is_empty());
}

#[test]
fn page_size_changes_are_written_back() {
    let settings = Rc::new(RefCell::new(MemorySettings::new()));
    let binding = PageSizeBinding::new("catalog", settings.clone());
    let mut controller =
        PaginationController::with_settings(provider(), DEFAULT_PAGE_SIZE, binding).unwrap();

    controller.set_page_size(200).unwrap();
    assert_eq!(settings.borrow().get_int("catalog_page_size"), Some(200));

    assert_eq!(
        controller.set_page_size(0),
        Err(PaginationError::InvalidPageSize)
    );
    assert_eq!(settings.borrow().get_int("catalog_page_size"), Some(200));
}

#[test]
fn stored_page_size_survives_restart() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");

    {
        let store = JsonSettingsStore::load(&path).expect("load settings");
        let settings = Rc::new(RefCell::new(store));
        let binding = PageSizeBinding::new("search", settings);
        let mut controller = PaginationController::with_settings(provider(), 20, binding).unwrap();
        assert_eq!(controller.state().page_size(), 20);
        controller.set_page_size(100).unwrap();
    }

    let store = JsonSettingsStore::load(&path).expect("reload settings");
    assert_eq!(store.get_int("search_page_size"), Some(100));

    let binding = PageSizeBinding::new("search", Rc::new(RefCell::new(store)));
    let controller = PaginationController::with_settings(provider(), 20, binding).unwrap();
    assert_eq!(controller.state().page_size(), 100);
    assert_eq!(controller.state().total_pages(), 5);
}

#[test]
fn zero_default_is_rejected() {
    let binding = PageSizeBinding::new("catalog", Rc::new(RefCell::new(MemorySettings::new())));
    assert_eq!(
        PaginationController::with_settings(provider(), 0, binding).unwrap_err(),
        PaginationError::InvalidPageSize
    );
}
