use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use view_state::{Notice, NoticeLevel, Notify};

/// How many toasts stay on screen before the oldest is dropped.
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Toast list backing the mutation dispatcher's notices.
#[derive(Clone)]
pub struct ToastNotifier {
    toasts: Signal<Vec<Toast>>,
    next_id: Rc<Cell<u64>>,
}

impl ToastNotifier {
    pub fn new(toasts: Signal<Vec<Toast>>) -> Self {
        Self {
            toasts,
            next_id: Rc::new(Cell::new(1)),
        }
    }
}

impl Notify for ToastNotifier {
    fn notify(&self, notice: Notice) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let mut toasts = self.toasts;
        toasts.with_mut(|list| push_capped(list, Toast { id, notice }));
    }
}

fn push_capped(list: &mut Vec<Toast>, toast: Toast) {
    list.push(toast);
    if list.len() > MAX_TOASTS {
        let excess = list.len() - MAX_TOASTS;
        list.drain(..excess);
    }
}

/// Renders the toast stack. Toasts stay until dismissed or pushed out.
#[component]
pub fn ToastHost(toasts: Signal<Vec<Toast>>) -> Element {
    let mut toasts = toasts;
    let list = toasts.read().clone();

    rsx! {
        div { class: "toast-stack",
            for toast in list {
                div {
                    key: "{toast.id}",
                    class: match toast.notice.level {
                        NoticeLevel::Success => "toast",
                        NoticeLevel::Error => "toast error",
                    },
                    span { "{toast.notice.message}" }
                    button {
                        onclick: move |_| toasts.with_mut(|l| l.retain(|t| t.id != toast.id)),
                        "x"
                    }
                }
            }
        }
    }
}
