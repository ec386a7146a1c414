use crate::auth::use_auth;
use dioxus::prelude::*;
use shared_types::Role;
use view_state::GateState;

/// Gate state for `required`, recomputed whenever the session changes.
pub fn use_gate(required: Role) -> GateState {
    let auth = use_auth();
    let state = auth.state.read();
    GateState::evaluate(required, &state)
}

/// Render children only for a session of exactly `required`.
///
/// While the session is being restored nothing but a loading line renders,
/// so neither the content nor the denial flashes.
#[component]
pub fn RoleGate(required: Role, children: Element) -> Element {
    match use_gate(required) {
        GateState::Permitted(_) => rsx! { {children} },
        GateState::Loading => rsx! {
            div { class: "gate-message", p { "Loading..." } }
        },
        GateState::Denied { login_route, .. } => rsx! {
            div { class: "gate-message",
                h2 { "Access denied" }
                p { "You need to sign in as {required.title().to_lowercase()} to view this page." }
                Link { to: login_route, "Go to {required.title()} login" }
            }
        },
    }
}
