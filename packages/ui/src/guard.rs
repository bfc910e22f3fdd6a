//! Role-gated route guard.
//!
//! The decision is a pure function of the session state and the required
//! role; [`RequireRole`] maps it onto a placeholder, the children, or a
//! client-side redirect. Advisory only — the backend enforces role checks on
//! every call, since a client guard cannot stop direct requests.

use api::models::Role;
use dioxus::prelude::*;

use crate::browser;
use crate::session::{use_session, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session check still in flight; render a placeholder.
    Loading,
    /// Render the guarded children.
    Allow,
    /// No session; back to the login route.
    ToLogin,
    /// Wrong role; over to the student dashboard.
    ToStudent,
    /// Wrong role; over to the teacher dashboard.
    ToTeacher,
}

impl GuardDecision {
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GuardDecision::ToLogin => Some("/"),
            GuardDecision::ToStudent => Some("/student"),
            GuardDecision::ToTeacher => Some("/teacher"),
            GuardDecision::Loading | GuardDecision::Allow => None,
        }
    }
}

pub fn decide(state: &SessionState, required: Role) -> GuardDecision {
    if state.loading {
        return GuardDecision::Loading;
    }
    match &state.user {
        None => GuardDecision::ToLogin,
        Some(user) if user.role == required => GuardDecision::Allow,
        Some(user) => match user.role {
            Role::Student => GuardDecision::ToStudent,
            Role::Teacher => GuardDecision::ToTeacher,
        },
    }
}

/// Renders its children only for an authenticated user with the given role.
#[component]
pub fn RequireRole(role: Role, children: Element) -> Element {
    let session = use_session();
    let state = session.state();

    match decide(&state, role) {
        GuardDecision::Loading => rsx! {
            div { class: "loading-screen",
                i { class: "fas fa-spinner fa-spin" }
                " Loading..."
            }
        },
        GuardDecision::Allow => rsx! {
            {children}
        },
        decision => {
            if let Some(path) = decision.redirect_path() {
                browser::redirect(path);
            }
            rsx! {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::UserInfo;

    fn user(role: Role) -> UserInfo {
        UserInfo {
            id: 1,
            full_name: "A".to_string(),
            email: "a@b.c".to_string(),
            role,
            subject: None,
        }
    }

    fn state(user: Option<UserInfo>, loading: bool) -> SessionState {
        SessionState {
            user,
            loading,
            error: None,
        }
    }

    #[test]
    fn loading_renders_a_placeholder_even_with_a_user() {
        assert_eq!(
            decide(&state(Some(user(Role::Student)), true), Role::Student),
            GuardDecision::Loading
        );
        assert_eq!(decide(&state(None, true), Role::Teacher), GuardDecision::Loading);
    }

    #[test]
    fn anonymous_goes_to_login() {
        let decision = decide(&state(None, false), Role::Student);
        assert_eq!(decision, GuardDecision::ToLogin);
        assert_eq!(decision.redirect_path(), Some("/"));
    }

    #[test]
    fn matching_role_is_allowed() {
        let decision = decide(&state(Some(user(Role::Teacher)), false), Role::Teacher);
        assert_eq!(decision, GuardDecision::Allow);
        assert_eq!(decision.redirect_path(), None);
    }

    #[test]
    fn mismatched_role_redirects_to_its_own_dashboard() {
        assert_eq!(
            decide(&state(Some(user(Role::Student)), false), Role::Teacher),
            GuardDecision::ToStudent
        );
        assert_eq!(
            decide(&state(Some(user(Role::Teacher)), false), Role::Student),
            GuardDecision::ToTeacher
        );
        assert_eq!(GuardDecision::ToStudent.redirect_path(), Some("/student"));
        assert_eq!(GuardDecision::ToTeacher.redirect_path(), Some("/teacher"));
    }
}
