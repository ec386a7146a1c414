use dioxus::prelude::*;
use std::collections::HashSet;
use std::rc::Rc;
use tokio::sync::watch;
use view_state::{
    DetailDrilldown, DrilldownState, FetchSet, PendingKey, ResourceLoader, ResourceState,
};

use crate::auth::use_services;

/// Mirror a `watch` channel into a signal.
///
/// `subscribe` is called once on mount. The signal follows every value
/// published afterwards until the sender is dropped.
pub fn use_watch<T: Clone + 'static>(
    subscribe: impl Fn() -> watch::Receiver<T> + 'static,
) -> Signal<T> {
    let mut value = use_signal(|| subscribe().borrow().clone());
    let subscribe = use_hook(|| Rc::new(subscribe));

    use_future(move || {
        let mut rx = subscribe();
        async move {
            value.set(rx.borrow_and_update().clone());
            while rx.changed().await.is_ok() {
                value.set(rx.borrow_and_update().clone());
            }
        }
    });

    value
}

/// Create a loader for this component, refresh it on mount, and expose its
/// state as a signal.
pub fn use_loader<T>(
    name: &'static str,
    fetches: impl FnOnce() -> FetchSet<T>,
) -> (ResourceLoader<T>, Signal<ResourceState<T>>)
where
    T: Default + Clone + 'static,
{
    let loader = use_hook(|| ResourceLoader::new(name, fetches()));

    let state = use_watch({
        let loader = loader.clone();
        move || loader.subscribe()
    });

    use_future({
        let loader = loader.clone();
        move || {
            let loader = loader.clone();
            async move { loader.refresh().await }
        }
    });

    (loader, state)
}

pub fn use_drilldown<T: Clone + 'static>(
    name: &'static str,
) -> (DetailDrilldown<T>, Signal<DrilldownState<T>>) {
    let drill = use_hook(|| DetailDrilldown::new(name));
    let state = use_watch({
        let drill = drill.clone();
        move || drill.subscribe()
    });
    (drill, state)
}

/// Loader passed down as a component prop. Two handles are equal only when
/// they drive the same loader.
#[derive(Clone)]
pub struct LoaderHandle<T>(pub ResourceLoader<T>);

impl<T: Default + Clone + 'static> PartialEq for LoaderHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

/// Keys with a mutation in flight, for disabling controls.
pub fn use_pending() -> Signal<HashSet<PendingKey>> {
    let services = use_services();
    use_watch(move || services.dispatcher.subscribe_pending())
}
