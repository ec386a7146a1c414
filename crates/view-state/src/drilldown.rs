use shared_types::AppError;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStatus {
    Loading,
    Ready,
    /// The fetch failed or the entity does not exist.
    Absent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord<T> {
    pub entity: Option<T>,
    pub status: DetailStatus,
}

/// What the overlay renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DrilldownState<T> {
    pub visible: bool,
    pub record: Option<DetailRecord<T>>,
}

impl<T> DrilldownState<T> {
    fn hidden() -> Self {
        Self {
            visible: false,
            record: None,
        }
    }

    pub fn status(&self) -> Option<DetailStatus> {
        self.record.as_ref().map(|r| r.status)
    }

    pub fn entity(&self) -> Option<&T> {
        self.record.as_ref().and_then(|r| r.entity.as_ref())
    }
}

/// Single-entity detail overlay. Opening a new entity replaces whatever the
/// overlay showed, and only the most recent `open` may publish.
pub struct DetailDrilldown<T> {
    name: &'static str,
    seq: Rc<Cell<u64>>,
    state: Rc<watch::Sender<DrilldownState<T>>>,
}

impl<T> Clone for DetailDrilldown<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            seq: Rc::clone(&self.seq),
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Clone> DetailDrilldown<T> {
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(DrilldownState::hidden());
        Self {
            name,
            seq: Rc::new(Cell::new(0)),
            state: Rc::new(state),
        }
    }

    pub fn state(&self) -> DrilldownState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DrilldownState<T>> {
        self.state.subscribe()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().visible
    }

    /// Show the overlay in `Loading` and await `fetch`.
    ///
    /// Returns `true` if the result was applied, `false` if a later `open`
    /// or a `close` superseded it.
    pub async fn open<Fut>(&self, fetch: Fut) -> bool
    where
        Fut: Future<Output = Result<T, AppError>>,
    {
        let seq = self.seq.get() + 1;
        self.seq.set(seq);
        self.state.send_replace(DrilldownState {
            visible: true,
            record: Some(DetailRecord {
                entity: None,
                status: DetailStatus::Loading,
            }),
        });

        let result = fetch.await;

        if self.seq.get() != seq {
            tracing::debug!(drilldown = self.name, seq, "superseded detail discarded");
            return false;
        }

        let record = match result {
            Ok(entity) => DetailRecord {
                entity: Some(entity),
                status: DetailStatus::Ready,
            },
            Err(err) => {
                tracing::warn!(drilldown = self.name, error = %err, "detail fetch failed");
                DetailRecord {
                    entity: None,
                    status: DetailStatus::Absent,
                }
            }
        };
        self.state.send_replace(DrilldownState {
            visible: true,
            record: Some(record),
        });
        true
    }

    /// Hide the overlay and supersede any fetch still in flight.
    pub fn close(&self) {
        self.seq.set(self.seq.get() + 1);
        self.state.send_replace(DrilldownState::hidden());
    }
}
