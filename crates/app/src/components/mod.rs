use dioxus::prelude::*;
use view_state::analytics::{format_score, ScoreBand};
use view_state::{DetailStatus, LoadStatus, ResourceState};

/// Modal panel shared by the drilldowns.
#[component]
pub fn Overlay(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "overlay-backdrop", onclick: move |_| on_close.call(()),
            div { class: "overlay-panel", onclick: move |evt| evt.stop_propagation(),
                div { class: "overlay-header",
                    h3 { "{title}" }
                    button { class: "secondary", onclick: move |_| on_close.call(()), "Close" }
                }
                {children}
            }
        }
    }
}

/// Body of a drilldown overlay for the given status. `children` renders the
/// ready entity.
#[component]
pub fn DetailBody(status: Option<DetailStatus>, not_found: String, children: Element) -> Element {
    match status {
        Some(DetailStatus::Ready) => rsx! { {children} },
        Some(DetailStatus::Absent) => rsx! { p { class: "empty-state", "{not_found}" } },
        Some(DetailStatus::Loading) | None => rsx! { p { class: "muted", "Loading..." } },
    }
}

#[component]
pub fn StatCard(label: String, value: String, class: Option<String>) -> Element {
    let class = class.unwrap_or_default();
    rsx! {
        div { class: "card",
            div { class: "stat-value {class}", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

#[component]
pub fn ScoreText(score: f64) -> Element {
    let band = ScoreBand::of(score);
    rsx! {
        span { class: band.css_class(), "{format_score(score)}" }
    }
}

/// Horizontal bar scaled against `max`.
#[component]
pub fn Bar(label: String, value: i64, max: i64) -> Element {
    let pct = if max > 0 { value * 100 / max } else { 0 };
    rsx! {
        div { class: "bar",
            span { class: "bar-label", "{label}" }
            div { class: "bar-fill", style: "width: {pct}%" }
            span { class: "muted", "{value}" }
        }
    }
}

/// What a dashboard renders for its loader state, when not its data.
///
/// Returns `None` once the data is ready.
pub fn load_placeholder<T>(state: &ResourceState<T>, what: &str) -> Option<Element> {
    match state.status {
        LoadStatus::Ready => None,
        LoadStatus::Loading if state.data.is_none() => Some(rsx! {
            p { class: "muted", "Loading {what}..." }
        }),
        // A refresh over existing data keeps showing the old data.
        LoadStatus::Loading => None,
        LoadStatus::Error => {
            let message = state
                .error_message
                .clone()
                .unwrap_or_else(|| format!("Failed to load {what}"));
            Some(rsx! {
                div { class: "inline-error", "{message}" }
            })
        }
    }
}
