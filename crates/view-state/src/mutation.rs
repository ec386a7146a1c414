use futures::future::LocalBoxFuture;
use shared_types::AppError;
use std::collections::HashSet;
use std::future::Future;
use std::rc::Rc;
use tokio::sync::watch;

use crate::resource::Refreshable;

/// Identifies one in-flight mutation, e.g. `("enroll", 3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingKey {
    pub kind: &'static str,
    pub id: i64,
}

impl PendingKey {
    pub const fn new(kind: &'static str, id: i64) -> Self {
        Self { kind, id }
    }
}

/// A single user-triggered write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub key: PendingKey,
    /// Asked before anything is sent. `None` means no confirmation step.
    pub confirm: Option<String>,
    /// Shown after the mutation and refresh succeed.
    pub success: Option<String>,
}

impl MutationRequest {
    pub fn new(kind: &'static str, id: i64) -> Self {
        Self {
            key: PendingKey::new(kind, id),
            confirm: None,
            success: None,
        }
    }

    pub fn confirm(mut self, prompt: impl Into<String>) -> Self {
        self.confirm = Some(prompt.into());
        self
    }

    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.success = Some(message.into());
        self
    }
}

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> LocalBoxFuture<'_, bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message shown to the user after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Notify {
    fn notify(&self, notice: Notice);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The user declined the confirmation; nothing was sent.
    Declined,
    /// A mutation with the same key was still in flight; nothing was sent.
    AlreadyPending,
    Succeeded,
    Failed(AppError),
}

/// Runs user mutations: optional confirmation, pending tracking per key,
/// then a refresh of the affected view. Clones share the pending set.
#[derive(Clone)]
pub struct MutationDispatcher {
    confirm: Rc<dyn Confirm>,
    notify: Rc<dyn Notify>,
    pending: Rc<watch::Sender<HashSet<PendingKey>>>,
}

impl MutationDispatcher {
    pub fn new(confirm: Rc<dyn Confirm>, notify: Rc<dyn Notify>) -> Self {
        let (pending, _) = watch::channel(HashSet::new());
        Self {
            confirm,
            notify,
            pending: Rc::new(pending),
        }
    }

    pub fn is_pending(&self, key: PendingKey) -> bool {
        self.pending.borrow().contains(&key)
    }

    /// Keys currently in flight; views disable matching controls.
    pub fn subscribe_pending(&self) -> watch::Receiver<HashSet<PendingKey>> {
        self.pending.subscribe()
    }

    fn set_pending(&self, key: PendingKey, pending: bool) {
        self.pending.send_modify(|set| {
            if pending {
                set.insert(key);
            } else {
                set.remove(&key);
            }
        });
    }

    /// Dispatch one mutation.
    ///
    /// Confirmation happens before any network effect. On success the
    /// loader is refreshed before the key stops being pending, so the
    /// control is never re-enabled over stale data. A failed mutation does
    /// not refresh.
    pub async fn dispatch<F, Fut>(
        &self,
        request: MutationRequest,
        mutation: F,
        loader: &dyn Refreshable,
    ) -> DispatchOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let key = request.key;
        if self.is_pending(key) {
            tracing::debug!(kind = key.kind, id = key.id, "mutation already pending");
            return DispatchOutcome::AlreadyPending;
        }

        if let Some(prompt) = request.confirm.as_deref() {
            if !self.confirm.confirm(prompt).await {
                tracing::debug!(kind = key.kind, id = key.id, "mutation declined");
                return DispatchOutcome::Declined;
            }
            // Another dispatch may have started while the dialog was open.
            if self.is_pending(key) {
                return DispatchOutcome::AlreadyPending;
            }
        }

        self.set_pending(key, true);
        tracing::info!(kind = key.kind, id = key.id, "mutation started");

        let outcome = match mutation().await {
            Ok(()) => {
                loader.request_refresh().await;
                if let Some(message) = request.success {
                    self.notify.notify(Notice::success(message));
                }
                tracing::info!(kind = key.kind, id = key.id, "mutation succeeded");
                DispatchOutcome::Succeeded
            }
            Err(err) => {
                tracing::warn!(kind = key.kind, id = key.id, error = %err, "mutation failed");
                self.notify.notify(Notice::error(err.message.clone()));
                DispatchOutcome::Failed(err)
            }
        };

        self.set_pending(key, false);
        outcome
    }
}
