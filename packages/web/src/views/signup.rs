//! Signup page with client-side validation before the request.

use api::models::{Role, SignupRequest};
use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

#[component]
pub fn Signup() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut subject = use_signal(String::new);
    let mut agreed = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            if full_name().trim().is_empty() {
                error.set(Some("Please enter your full name".to_string()));
                return;
            }
            if email().trim().is_empty() {
                error.set(Some("Please enter your email".to_string()));
                return;
            }
            if password().len() < 6 {
                error.set(Some("Password must be at least 6 characters".to_string()));
                return;
            }
            if password() != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }
            if role() == Role::Teacher && subject().trim().is_empty() {
                error.set(Some("Please enter the subject you teach".to_string()));
                return;
            }
            if !agreed() {
                error.set(Some(
                    "You must agree to the Terms of Use and Privacy Policy".to_string(),
                ));
                return;
            }

            submitting.set(true);
            let request = SignupRequest {
                full_name: full_name().trim().to_string(),
                email: email().trim().to_string(),
                password: password(),
                role: role(),
                subject: if role() == Role::Teacher {
                    subject().trim().to_string()
                } else {
                    String::new()
                },
                agreed: agreed(),
            };
            match session.signup(request).await {
                Ok(()) => {
                    nav.push(Route::Login {});
                }
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
            div { class: "auth-box signup-box",
                h2 { "Create Your Account" }

                form { onsubmit: handle_submit,
                    div { class: "form-group",
                        label { "Full Name" }
                        input {
                            name: "full_name",
                            value: full_name(),
                            disabled: submitting(),
                            required: true,
                            oninput: move |evt| full_name.set(evt.value()),
                        }
                    }

                    div { class: "form-group",
                        label { "Email Address" }
                        input {
                            r#type: "email",
                            name: "email",
                            value: email(),
                            disabled: submitting(),
                            required: true,
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }

                    div { class: "form-row",
                        div { class: "form-group",
                            label { "Password" }
                            input {
                                r#type: "password",
                                name: "password",
                                value: password(),
                                disabled: submitting(),
                                required: true,
                                oninput: move |evt| password.set(evt.value()),
                            }
                        }
                        div { class: "form-group",
                            label { "Confirm Password" }
                            input {
                                r#type: "password",
                                name: "confirm_password",
                                value: confirm_password(),
                                disabled: submitting(),
                                required: true,
                                oninput: move |evt| confirm_password.set(evt.value()),
                            }
                        }
                    }

                    div { class: "form-group",
                        label { "Role" }
                        select {
                            value: role().as_str(),
                            disabled: submitting(),
                            onchange: move |evt| {
                                role.set(if evt.value() == "teacher" {
                                    Role::Teacher
                                } else {
                                    Role::Student
                                });
                            },
                            option { value: "student", "Student" }
                            option { value: "teacher", "Teacher" }
                        }
                    }

                    if role() == Role::Teacher {
                        div { class: "form-group",
                            label { "Subject(s) You Want to Teach" }
                            input {
                                name: "subject",
                                value: subject(),
                                disabled: submitting(),
                                oninput: move |evt| subject.set(evt.value()),
                            }
                        }
                    }

                    div { class: "terms",
                        label {
                            input {
                                r#type: "checkbox",
                                name: "agreed",
                                checked: agreed(),
                                disabled: submitting(),
                                onchange: move |evt| agreed.set(evt.checked()),
                            }
                            " By signing up, I agree with the "
                            a { href: "#", "Terms of Use" }
                            " & "
                            a { href: "#", "Privacy Policy" }
                        }
                    }

                    button {
                        r#type: "submit",
                        class: "signup-btn",
                        disabled: submitting(),
                        if submitting() {
                            i { class: "fas fa-spinner fa-spin" }
                            " Creating account..."
                        } else {
                            "Sign up"
                        }
                    }
                }

                if let Some(message) = error() {
                    div { class: "alert error preline", "{message}" }
                }

                p { class: "auth-link",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
