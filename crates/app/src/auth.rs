use api_client::ApiClient;
use dioxus::prelude::*;
use shared_types::{Role, Session};
use std::rc::Rc;
use view_state::{KeyValueStore, MemoryStore, MutationDispatcher, SessionState, SessionStore};

/// Long-lived controllers shared by every route.
#[derive(Clone)]
pub struct Services {
    pub session: SessionStore,
    pub api: ApiClient,
    pub dispatcher: MutationDispatcher,
}

/// Reactive mirror of the session store, for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub state: Signal<SessionState>,
}

impl AuthState {
    pub fn session(&self) -> Option<Session> {
        self.state.read().session().cloned()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.read().session().map(|s| s.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().session().is_some()
    }
}

pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

pub fn use_services() -> Services {
    use_context::<Services>()
}

/// Build the platform's persistent key-value store.
///
/// Falls back to memory, meaning sessions do not survive a restart, when no
/// durable store is available.
pub fn session_storage() -> Rc<dyn KeyValueStore> {
    #[cfg(feature = "web")]
    {
        if let Some(store) = crate::local_storage::LocalStorageStore::open() {
            return Rc::new(store);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let configured = api_client::config::config().session.file.clone();
        let path = configured
            .map(std::path::PathBuf::from)
            .or_else(view_state::FileStore::default_path);
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "session file");
            return Rc::new(view_state::FileStore::new(path));
        }
    }

    tracing::warn!("no durable session storage, using memory");
    Rc::new(MemoryStore::new())
}
