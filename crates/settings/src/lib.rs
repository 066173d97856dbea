//! Key-value settings service shared by the editor's panels.

pub mod store;

pub use store::{JsonSettingsStore, MemorySettings, SettingsError, SettingsStore};
