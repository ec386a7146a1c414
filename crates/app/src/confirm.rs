use dioxus::prelude::*;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::oneshot;
use view_state::Confirm;

/// A question waiting for the user's answer.
#[derive(Clone)]
pub struct ConfirmRequest {
    pub prompt: String,
    reply: Rc<RefCell<Option<oneshot::Sender<bool>>>>,
}

impl ConfirmRequest {
    fn answer(&self, yes: bool) {
        if let Some(tx) = self.reply.borrow_mut().take() {
            let _ = tx.send(yes);
        }
    }
}

/// [`Confirm`] backed by the modal rendered by [`ConfirmHost`].
///
/// A new question replaces an unanswered one, which then counts as declined.
#[derive(Clone, Copy)]
pub struct DialogConfirm {
    request: Signal<Option<ConfirmRequest>>,
}

impl DialogConfirm {
    pub fn new(request: Signal<Option<ConfirmRequest>>) -> Self {
        Self { request }
    }
}

impl Confirm for DialogConfirm {
    fn confirm(&self, prompt: &str) -> LocalBoxFuture<'_, bool> {
        let (tx, rx) = oneshot::channel();
        let mut request = self.request;
        let previous = std::mem::replace(
            &mut *request.write(),
            Some(ConfirmRequest {
                prompt: prompt.to_string(),
                reply: Rc::new(RefCell::new(Some(tx))),
            }),
        );
        if let Some(previous) = previous {
            previous.answer(false);
        }
        async move { rx.await.unwrap_or(false) }.boxed_local()
    }
}

#[component]
pub fn ConfirmHost(request: Signal<Option<ConfirmRequest>>) -> Element {
    let mut request = request;
    let current = request.read().clone();

    let mut respond = move |yes: bool| {
        let pending = request.write().take();
        if let Some(pending) = pending {
            pending.answer(yes);
        }
    };

    match current {
        Some(pending) => rsx! {
            div { class: "overlay-backdrop",
                div { class: "overlay-panel",
                    p { "{pending.prompt}" }
                    div { class: "row",
                        button { class: "danger", onclick: move |_| respond(true), "Confirm" }
                        button { class: "secondary", onclick: move |_| respond(false), "Cancel" }
                    }
                }
            }
        },
        None => rsx! {},
    }
}
