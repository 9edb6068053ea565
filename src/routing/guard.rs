use crate::identity::SessionState;
use crate::routing::policy::{decide, Decision};
use crate::routing::route::Route;

/// What one guard evaluation hands the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Redirect(Route),
}

/// Gate for screens that need a signed-in session. Rehydrates before
/// deciding, so a store cleared by another process is caught on this
/// navigation rather than the next restart.
pub fn protected(state: &mut SessionState, path: &str) -> GuardOutcome {
    state.rehydrate();
    match decide(state.session(), path) {
        Decision::Allow => GuardOutcome::Render,
        Decision::ToLogin => GuardOutcome::Redirect(Route::Login),
        Decision::ToDefault => GuardOutcome::Redirect(state.default_landing()),
        Decision::ToForbidden => GuardOutcome::Redirect(Route::Forbidden),
    }
}

/// Gate for the public screens. Renders only for anonymous sessions;
/// signed-in sessions are sent to their landing route.
pub fn public(state: &mut SessionState, path: &str) -> GuardOutcome {
    state.rehydrate();
    match decide(state.session(), path) {
        Decision::Allow => GuardOutcome::Render,
        _ => GuardOutcome::Redirect(state.default_landing()),
    }
}
