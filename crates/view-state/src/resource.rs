use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use shared_types::AppError;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Error,
}

/// In-memory, replace-on-refresh data backing a view.
///
/// `data` is a record of named slots. It keeps the last complete batch while
/// a refresh is loading and after a refresh fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub status: LoadStatus,
    pub error_message: Option<String>,
}

impl<T> ResourceState<T> {
    fn initial() -> Self {
        Self {
            data: None,
            status: LoadStatus::Loading,
            error_message: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Data to render: present only when the latest batch succeeded.
    pub fn ready(&self) -> Option<&T> {
        match self.status {
            LoadStatus::Ready => self.data.as_ref(),
            _ => None,
        }
    }
}

type ApplyFn<T> = Box<dyn FnOnce(&mut T)>;
type SlotFetch<T> = Box<dyn Fn() -> LocalBoxFuture<'static, Result<ApplyFn<T>, AppError>>>;

/// Named, independent fetches that together fill one slot record `T`.
pub struct FetchSet<T> {
    slots: Vec<(&'static str, SlotFetch<T>)>,
}

impl<T: 'static> Default for FetchSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> FetchSet<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add a fetch whose result `assign` writes into its slot.
    ///
    /// `fetch` is called again on every refresh.
    pub fn slot<R, F, Fut, A>(mut self, name: &'static str, fetch: F, assign: A) -> Self
    where
        R: 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<R, AppError>> + 'static,
        A: Fn(&mut T, R) + 'static,
    {
        let assign = Rc::new(assign);
        let boxed: SlotFetch<T> = Box::new(move || {
            let pending = fetch();
            let assign = Rc::clone(&assign);
            async move {
                let value = pending.await?;
                let apply: ApplyFn<T> = Box::new(move |record: &mut T| assign(record, value));
                Ok(apply)
            }
            .boxed_local()
        });
        self.slots.push((name, boxed));
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Anything a successful mutation can ask to reload.
pub trait Refreshable {
    fn request_refresh(&self) -> LocalBoxFuture<'_, ()>;
}

/// Loads a [`FetchSet`] concurrently and publishes the combined result.
///
/// Each refresh takes the next sequence number; only the newest refresh may
/// publish. Clones share state.
pub struct ResourceLoader<T> {
    inner: Rc<LoaderInner<T>>,
}

struct LoaderInner<T> {
    name: &'static str,
    fetches: FetchSet<T>,
    seq: Cell<u64>,
    state: watch::Sender<ResourceState<T>>,
}

impl<T> Clone for ResourceLoader<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default + Clone + 'static> ResourceLoader<T> {
    /// Create a loader in the `Loading` state. Nothing is fetched until the
    /// first [`refresh`](Self::refresh).
    pub fn new(name: &'static str, fetches: FetchSet<T>) -> Self {
        let (state, _) = watch::channel(ResourceState::initial());
        Self {
            inner: Rc::new(LoaderInner {
                name,
                fetches,
                seq: Cell::new(0),
                state,
            }),
        }
    }

    pub fn state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    /// Whether both handles drive the same loader.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn is_current(&self, seq: u64) -> bool {
        self.inner.seq.get() == seq
    }

    /// Re-run every fetch and replace all slots at once.
    ///
    /// The first failure publishes `Error` immediately. Fetches still in
    /// flight are then drained and their results discarded. Returns once
    /// every fetch has finished.
    pub async fn refresh(&self) {
        let seq = self.inner.seq.get() + 1;
        self.inner.seq.set(seq);
        let name = self.inner.name;

        self.inner.state.send_modify(|state| {
            state.status = LoadStatus::Loading;
            state.error_message = None;
        });
        tracing::debug!(loader = name, seq, slots = self.inner.fetches.len(), "refresh started");

        let mut pending: FuturesUnordered<_> = self
            .inner
            .fetches
            .slots
            .iter()
            .map(|(slot, fetch)| {
                let slot = *slot;
                fetch().map(move |result| (slot, result))
            })
            .collect();

        let mut staged = T::default();
        let mut failed = false;

        while let Some((slot, result)) = pending.next().await {
            if failed {
                continue;
            }
            match result {
                Ok(apply) => apply(&mut staged),
                Err(err) => {
                    failed = true;
                    if self.is_current(seq) {
                        tracing::warn!(loader = name, slot, error = %err, "refresh failed");
                        self.inner.state.send_modify(|state| {
                            state.status = LoadStatus::Error;
                            state.error_message = Some(err.message);
                        });
                    } else {
                        tracing::debug!(loader = name, seq, slot, "superseded refresh failed, discarded");
                    }
                }
            }
        }

        if failed {
            return;
        }

        if self.is_current(seq) {
            tracing::debug!(loader = name, seq, "refresh ready");
            self.inner.state.send_replace(ResourceState {
                data: Some(staged),
                status: LoadStatus::Ready,
                error_message: None,
            });
        } else {
            tracing::debug!(loader = name, seq, "superseded refresh discarded");
        }
    }
}

impl<T: Default + Clone + 'static> Refreshable for ResourceLoader<T> {
    fn request_refresh(&self) -> LocalBoxFuture<'_, ()> {
        self.refresh().boxed_local()
    }
}
