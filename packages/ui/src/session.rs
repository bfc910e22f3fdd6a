//! Session context and hooks for the UI.
//!
//! The session is the only state shared across views. It is held in a single
//! signal and mutated exclusively through the operations on [`Session`]; the
//! backend cookie jar is the actual source of truth and [`Session::check_auth`]
//! is the only way to observe it.

use api::models::{LoginReply, LoginRequest, SignupRequest, UserInfo};
use dioxus::prelude::*;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<UserInfo>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Copyable handle over the shared session signal.
#[derive(Clone, Copy)]
pub struct Session {
    state: Signal<SessionState>,
}

/// Get the current session handle.
pub fn use_session() -> Session {
    use_context::<Session>()
}

/// Provider component that owns the session state. Wrap the router with this
/// component; it checks for an active backend session once on mount.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let state = use_signal(SessionState::default);
    let session = use_context_provider(|| Session { state });

    let _ = use_resource(move || async move {
        session.check_auth().await;
    });

    rsx! {
        {children}
    }
}

impl Session {
    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        (self.state)()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state().user
    }

    /// Ask the backend who is logged in. Sole source of truth for whether a
    /// session is active; network failure resolves to anonymous.
    pub async fn check_auth(mut self) {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        match api::current_user().await {
            Ok(Some(user)) => {
                tracing::info!("user authenticated: {}", user.email);
                self.state.set(SessionState {
                    user: Some(user),
                    loading: false,
                    error: None,
                });
            }
            Ok(None) => {
                tracing::info!("no user session found");
                self.state.set(SessionState {
                    user: None,
                    loading: false,
                    error: None,
                });
            }
            Err(err) => {
                tracing::error!("session check failed: {}", err);
                self.state.set(SessionState {
                    user: None,
                    loading: false,
                    error: Some(
                        err.backend_message()
                            .unwrap_or("Failed to check authentication")
                            .to_string(),
                    ),
                });
            }
        }
    }

    /// Authenticate. On success the user is stored and returned; on failure
    /// the state keeps no user and the error string is returned.
    pub async fn login(mut self, request: LoginRequest) -> Result<UserInfo, String> {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        match api::login(&request).await {
            Ok(LoginReply {
                success: true,
                user: Some(user),
                ..
            }) => {
                tracing::info!("login successful: {}", user.email);
                self.state.set(SessionState {
                    user: Some(user.clone()),
                    loading: false,
                    error: None,
                });
                Ok(user)
            }
            Ok(reply) => {
                let message = reply.error.unwrap_or_else(|| "Login failed".to_string());
                tracing::warn!("login rejected: {}", message);
                self.fail(message.clone());
                Err(message)
            }
            Err(err) => {
                tracing::error!("login error: {}", err);
                let message = err.user_message();
                self.fail(message.clone());
                Err(message)
            }
        }
    }

    /// Create an account. Never authenticates the caller; a successful signup
    /// is followed by a normal login.
    pub async fn signup(mut self, request: SignupRequest) -> Result<(), String> {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        match api::signup(&request).await {
            Ok(reply) if reply.success => {
                tracing::info!("signup successful: {}", request.email);
                self.state.write().loading = false;
                Ok(())
            }
            Ok(reply) => {
                let message = reply
                    .flatten_errors()
                    .unwrap_or_else(|| "Signup failed".to_string());
                tracing::warn!("signup rejected: {}", message);
                self.fail_keep_user(message.clone());
                Err(message)
            }
            Err(err) => {
                tracing::error!("signup error: {}", err);
                let message = err.user_message();
                self.fail_keep_user(message.clone());
                Err(message)
            }
        }
    }

    /// End the session. Local state clears even when the request fails, so
    /// the client always ends up logged out from its own point of view.
    pub async fn logout(mut self) {
        self.state.write().loading = true;
        if let Err(err) = api::logout().await {
            tracing::error!("logout request failed: {}", err);
        } else {
            tracing::info!("logout successful");
        }
        self.state.set(SessionState {
            user: None,
            loading: false,
            error: None,
        });
    }

    fn fail(&mut self, message: String) {
        self.state.set(SessionState {
            user: None,
            loading: false,
            error: Some(message),
        });
    }

    fn fail_keep_user(&mut self, message: String) {
        let mut state = self.state.write();
        state.loading = false;
        state.error = Some(message);
    }
}
