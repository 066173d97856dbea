use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustpo_settings::SettingsStore;

/// Persists a view's page size under `<component>_page_size` in the injected settings service.
#[derive(Clone)]
pub struct PageSizeBinding {
    key: String,
    store: Rc<RefCell<dyn SettingsStore>>,
}

impl PageSizeBinding {
    pub fn new(component: &str, store: Rc<RefCell<dyn SettingsStore>>) -> Self {
        Self {
            key: format!("{component}_page_size"),
            store,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored page size, ignoring missing, zero, and negative values.
    pub fn load(&self) -> Option<usize> {
        let store = match self.store.try_borrow() {
            Ok(store) => store,
            Err(err) => {
                log::warn!("page size: settings busy while reading {}: {err}", self.key);
                return None;
            }
        };
        store
            .get_int(&self.key)
            .filter(|value| *value > 0)
            .and_then(|value| usize::try_from(value).ok())
    }

    /// Writes the page size; failures are logged and otherwise ignored.
    pub fn save(&self, page_size: usize) {
        let value = match i64::try_from(page_size) {
            Ok(value) => value,
            Err(_) => {
                log::warn!("page size: {page_size} does not fit a settings integer");
                return;
            }
        };
        let mut store = match self.store.try_borrow_mut() {
            Ok(store) => store,
            Err(err) => {
                log::warn!("page size: settings busy while writing {}: {err}", self.key);
                return;
            }
        };
        if let Err(err) = store.set_int(&self.key, value) {
            log::warn!("page size: failed to persist {}: {err}", self.key);
        }
    }
}

impl fmt::Debug for PageSizeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSizeBinding")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
