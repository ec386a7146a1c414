use dioxus::prelude::*;
use std::rc::Rc;

mod auth;
mod components;
mod confirm;
mod hooks;
#[cfg(feature = "web")]
mod local_storage;
pub mod notify;
pub mod role_gate;
mod routes;

use api_client::{config, ApiClient};
use auth::{session_storage, AuthState, Services};
use confirm::{ConfirmHost, ConfirmRequest, DialogConfirm};
use hooks::use_watch;
use notify::{Toast, ToastHost, ToastNotifier};
use routes::Route;
use view_state::{MutationDispatcher, SessionStore};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    config::load_config();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let toasts = use_signal(Vec::<Toast>::new);
    let confirm_request = use_signal(|| Option::<ConfirmRequest>::None);

    // Built once. The session is restored before the first route renders.
    let services = use_hook(move || {
        let session = SessionStore::new(session_storage());
        let restored = session.rehydrate();
        tracing::info!(
            web = cfg!(feature = "web"),
            restored = restored.is_some(),
            "quintet client starting"
        );

        let api = ApiClient::new(&config::config().api).with_token_source(Rc::new(session.clone()));
        let dispatcher = MutationDispatcher::new(
            Rc::new(DialogConfirm::new(confirm_request)),
            Rc::new(ToastNotifier::new(toasts)),
        );
        Services {
            session,
            api,
            dispatcher,
        }
    });
    use_context_provider(|| services.clone());

    let state = use_watch({
        let session = services.session.clone();
        move || session.subscribe()
    });
    use_context_provider(|| AuthState { state });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
        ToastHost { toasts }
        ConfirmHost { request: confirm_request }
    }
}
