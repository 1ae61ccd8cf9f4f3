//! Access gate for protected functionality.
//!
//! A pure, total decision function over the authentication state and the
//! requested location. No other outcomes exist.

use crate::session::AuthState;

/// The location unauthenticated users are redirected to.
pub const LOGIN_LOCATION: &str = "/login";

/// The outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session state is not resolved yet; show a neutral waiting indicator
    /// and attempt no further decision.
    Pending,
    /// Session is authenticated; proceed to the guarded content.
    Allow,
    /// Session is unauthenticated; redirect to the login entry point.
    /// `remember` must be carried through so a subsequent successful login
    /// returns the user to the original destination.
    Deny {
        redirect_to: String,
        remember: String,
    },
}

/// Decides whether the guarded content at `requested` may be shown.
pub fn evaluate(state: &AuthState, requested: &str) -> AccessDecision {
    match state {
        AuthState::Resolving => AccessDecision::Pending,
        AuthState::Unauthenticated => AccessDecision::Deny {
            redirect_to: LOGIN_LOCATION.to_string(),
            remember: requested.to_string(),
        },
        AuthState::Authenticated(_) => AccessDecision::Allow,
    }
}
