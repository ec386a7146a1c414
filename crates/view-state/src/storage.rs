use shared_types::AppError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Durable string key-value storage, shaped like browser `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// In-memory store. Clones share the same map, which lets tests simulate a
/// process restart by building a second `SessionStore` over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::KeyValueStore;
    use directories::ProjectDirs;
    use shared_types::AppError;
    use std::collections::HashMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    const APP_QUALIFIER: &str = "com";
    const APP_ORG: &str = "quintet";
    const APP_NAME: &str = "Quintet";
    const SESSION_FILENAME: &str = "session.json";

    /// Key-value store backed by a single JSON object file.
    ///
    /// Stored in the platform-specific application config folder:
    /// - macOS: ~/Library/Application Support/com.quintet.Quintet/
    /// - Windows: %APPDATA%/quintet/Quintet/config/
    /// - Linux: ~/.config/quintet/
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Default session file location. `None` if the platform directory
        /// cannot be determined.
        pub fn default_path() -> Option<PathBuf> {
            ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
                .map(|dirs| dirs.config_dir().join(SESSION_FILENAME))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_map(&self) -> Result<HashMap<String, String>, AppError> {
            match fs::read_to_string(&self.path) {
                Ok(content) => serde_json::from_str(&content).map_err(|e| {
                    AppError::storage(format!("Corrupt store file {:?}: {}", self.path, e))
                }),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
                Err(e) => Err(AppError::storage(format!(
                    "Failed to read {:?}: {}",
                    self.path, e
                ))),
            }
        }

        fn write_map(&self, map: &HashMap<String, String>) -> Result<(), AppError> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::storage(format!("Failed to create {:?}: {}", parent, e))
                })?;
            }
            let content = serde_json::to_string_pretty(map)
                .map_err(|e| AppError::storage(format!("Failed to serialize store: {e}")))?;
            fs::write(&self.path, content)
                .map_err(|e| AppError::storage(format!("Failed to write {:?}: {}", self.path, e)))
        }

        /// Current map, or an empty one if the file is corrupt. Writes
        /// overwrite corrupt files instead of failing forever.
        fn read_map_for_write(&self) -> Result<HashMap<String, String>, AppError> {
            match self.read_map() {
                Ok(map) => Ok(map),
                Err(e) if self.path.exists() => {
                    tracing::warn!(error = %e, "replacing unreadable store file");
                    Ok(HashMap::new())
                }
                Err(e) => Err(e),
            }
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, AppError> {
            Ok(self.read_map()?.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
            let mut map = self.read_map_for_write()?;
            map.insert(key.to_string(), value.to_string());
            self.write_map(&map)
        }

        fn remove(&self, key: &str) -> Result<(), AppError> {
            let mut map = self.read_map_for_write()?;
            if map.remove(key).is_some() {
                self.write_map(&map)?;
            }
            Ok(())
        }
    }

}
