//! Login page with a student/teacher role toggle.

use api::models::{LoginRequest, Role};
use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    // An already-authenticated visitor goes straight to their dashboard.
    let state = session.state();
    if !state.loading {
        if let Some(user) = &state.user {
            match user.role {
                Role::Student => {
                    nav.replace(Route::StudentDashboard {});
                }
                Role::Teacher => {
                    nav.replace(Route::TeacherDashboard {});
                }
            }
        }
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            submitting.set(true);
            let request = LoginRequest {
                email: email().trim().to_string(),
                password: password(),
                role: role(),
            };
            match session.login(request).await {
                Ok(user) => match user.role {
                    Role::Student => {
                        nav.push(Route::StudentDashboard {});
                    }
                    Role::Teacher => {
                        nav.push(Route::TeacherDashboard {});
                    }
                },
                Err(message) => error.set(Some(message)),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            div { class: "logo",
                i { class: "fas fa-graduation-cap" }
                span {
                    " cloud"
                    span { class: "highlight", "ED" }
                }
            }
            div { class: "auth-box login-box",
                h2 { "Welcome Back!" }

                div { class: "role-select",
                    label {
                        input {
                            r#type: "radio",
                            name: "role",
                            checked: role() == Role::Student,
                            onchange: move |_| role.set(Role::Student),
                        }
                        span { "Student" }
                        i { class: "fas fa-user-graduate" }
                    }
                    label {
                        input {
                            r#type: "radio",
                            name: "role",
                            checked: role() == Role::Teacher,
                            onchange: move |_| role.set(Role::Teacher),
                        }
                        span { "Teacher" }
                        i { class: "fas fa-chalkboard-teacher" }
                    }
                }

                form { onsubmit: handle_submit,
                    div { class: "form-group",
                        label { "Email Address" }
                        input {
                            r#type: "email",
                            name: "email",
                            placeholder: "Email Address",
                            value: email(),
                            disabled: submitting(),
                            required: true,
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }

                    div { class: "form-group",
                        label { "Password" }
                        input {
                            r#type: "password",
                            name: "password",
                            placeholder: "Password",
                            value: password(),
                            disabled: submitting(),
                            required: true,
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }

                    button {
                        r#type: "submit",
                        class: "login-btn",
                        disabled: submitting(),
                        if submitting() {
                            i { class: "fas fa-spinner fa-spin" }
                            " Logging in..."
                        } else {
                            i { class: "fas fa-sign-in-alt" }
                            " Login"
                        }
                    }
                }

                if let Some(message) = error() {
                    div { class: "alert error", "{message}" }
                }

                p { class: "auth-link",
                    "Don't have an account? "
                    Link { to: Route::Signup {}, "Sign up" }
                }
            }
        }
    }
}
