use shared_types::AppError;
use view_state::KeyValueStore;

/// Browser `localStorage`, used by the web build.
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// `None` when storage is disabled, e.g. in some private browsing modes.
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

fn js_error(action: &str, key: &str) -> AppError {
    AppError::storage(format!("localStorage {action} failed for {key}"))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.storage.get_item(key).map_err(|_| js_error("read", key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| js_error("write", key))
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.storage
            .remove_item(key)
            .map_err(|_| js_error("remove", key))
    }
}
