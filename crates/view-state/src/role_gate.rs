use shared_types::{Role, Session};

use crate::session::SessionState;

/// What a role-guarded view may render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Session not rehydrated yet; render neither content nor a denial.
    Loading,
    /// No session, or a session for another portal.
    Denied { required: Role, login_route: String },
    Permitted(Session),
}

impl GateState {
    /// Decide the render state for a view that requires `required`.
    ///
    /// Roles must match exactly. `Loading` wins over everything else so a
    /// denial never flashes while the session is being restored.
    pub fn evaluate(required: Role, state: &SessionState) -> Self {
        match state {
            SessionState::Rehydrating => GateState::Loading,
            SessionState::Ready(Some(session)) if session.role == required => {
                GateState::Permitted(session.clone())
            }
            SessionState::Ready(_) => GateState::Denied {
                required,
                login_route: required.login_route(),
            },
        }
    }

    pub fn is_permitted(&self) -> bool {
        matches!(self, GateState::Permitted(_))
    }
}
