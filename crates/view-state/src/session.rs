use api_client::TokenSource;
use shared_types::{AppError, PersistedUser, Role, Session, TokenResponse};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::watch;

use crate::storage::KeyValueStore;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the serialized `{user_id, role}`.
pub const USER_KEY: &str = "user";

/// Published session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Persisted storage has not been read yet.
    Rehydrating,
    Ready(Option<Session>),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Ready(session) => session.as_ref(),
            SessionState::Rehydrating => None,
        }
    }

    pub fn is_rehydrated(&self) -> bool {
        matches!(self, SessionState::Ready(_))
    }
}

/// Owner of the authenticated identity.
///
/// Created once by the application shell and handed to views, which only
/// read it. Clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

struct Inner {
    storage: Rc<dyn KeyValueStore>,
    state: watch::Sender<SessionState>,
    on_logout: RefCell<Option<Rc<dyn Fn()>>>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Rehydrating);
        Self {
            inner: Rc::new(Inner {
                storage,
                state,
                on_logout: RefCell::new(None),
            }),
        }
    }

    /// Read the persisted session. Malformed or partial data counts as no
    /// session; it is never an error.
    pub fn rehydrate(&self) -> Option<Session> {
        let session = read_persisted(self.inner.storage.as_ref());
        match &session {
            Some(s) => tracing::info!(role = %s.role, user_id = s.user_id, "session restored"),
            None => tracing::debug!("no persisted session"),
        }
        self.inner
            .state
            .send_replace(SessionState::Ready(session.clone()));
        session
    }

    /// Store and persist a new session, replacing any existing one.
    ///
    /// The session is visible to readers even if persisting it fails; the
    /// failure only means it will not survive a restart. A partial write is
    /// cleared so storage never pairs this token with an older user record.
    pub fn login(&self, token: impl Into<String>, role: Role, user_id: i64) -> Session {
        let session = Session::new(token, role, user_id);
        if let Err(e) = write_persisted(self.inner.storage.as_ref(), &session) {
            tracing::warn!(error = %e, "failed to persist session");
            self.clear_persisted();
        }
        tracing::info!(role = %role, user_id, "logged in");
        self.inner
            .state
            .send_replace(SessionState::Ready(Some(session.clone())));
        session
    }

    /// Log in from a token response. Fails without touching the current
    /// session when the response names an unknown role.
    pub fn login_with(&self, response: TokenResponse) -> Result<Session, AppError> {
        let session = response.into_session()?;
        Ok(self.login(session.token, session.role, session.user_id))
    }

    /// Clear the session and its persisted copy, then run the logout hook.
    pub fn logout(&self) {
        self.clear_persisted();
        self.inner.state.send_replace(SessionState::Ready(None));
        tracing::info!("logged out");

        // Released before the call so the hook may re-register itself.
        let hook = self.inner.on_logout.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Register the navigation callback run after every logout.
    pub fn on_logout(&self, hook: impl Fn() + 'static) {
        *self.inner.on_logout.borrow_mut() = Some(Rc::new(hook));
    }

    fn clear_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.inner.storage.remove(key) {
                tracing::warn!(key, error = %e, "failed to clear persisted session");
            }
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.inner.state.borrow().session().cloned()
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }
}

impl TokenSource for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.current_session().map(|s| s.token)
    }
}

fn read_persisted(storage: &dyn KeyValueStore) -> Option<Session> {
    let token = match storage.get(TOKEN_KEY) {
        Ok(Some(token)) if !token.is_empty() => token,
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "could not read persisted token");
            return None;
        }
    };

    let raw_user = match storage.get(USER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::warn!("persisted token without user record, ignoring");
            return None;
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read persisted user");
            return None;
        }
    };

    let user: PersistedUser = match serde_json::from_str(&raw_user) {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "malformed persisted user, ignoring");
            return None;
        }
    };

    let Some(role) = Role::parse(&user.role) else {
        tracing::warn!(role = %user.role, "unknown persisted role, ignoring");
        return None;
    };

    Some(Session::new(token, role, user.user_id))
}

fn write_persisted(storage: &dyn KeyValueStore, session: &Session) -> Result<(), AppError> {
    let user = serde_json::to_string(&session.persisted_user())
        .map_err(|e| AppError::storage(format!("Failed to serialize session: {e}")))?;
    storage.set(TOKEN_KEY, &session.token)?;
    storage.set(USER_KEY, &user)
}
