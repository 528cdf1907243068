use crate::preferences::PreferenceStore;
use anyhow::{anyhow, Result};
use gloo_storage::{LocalStorage, Storage};

/// `localStorage`, written as raw strings so existing visitors' saved
/// preferences (`th` / `en`) keep working.
#[derive(Debug, Default)]
pub struct BrowserStore;

impl PreferenceStore for BrowserStore {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| anyhow!("localStorage write failed: {:?}", e))
    }
}
