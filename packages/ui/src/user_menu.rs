use api::models::UserInfo;
use dioxus::prelude::*;

use crate::browser;
use crate::session::use_session;

/// Header dropdown showing the signed-in identity with a logout action.
/// Logging out clears the session and returns to the login route even when
/// the backend call fails.
#[component]
pub fn UserMenu(user: UserInfo) -> Element {
    let session = use_session();
    let mut open = use_signal(|| false);

    let handle_logout = move |_| async move {
        session.logout().await;
        browser::redirect("/");
    };

    rsx! {
        div { class: "user-menu",
            div {
                class: "user-icon",
                role: "button",
                onclick: move |_| open.set(!open()),
                i { class: "fas fa-user" }
            }
            if open() {
                div { class: "dropdown open",
                    p { class: "dropdown-name", "{user.display_name()}" }
                    p { class: "dropdown-email", "{user.email}" }
                    if let Some(subject) = user.subject_or_none() {
                        p { class: "dropdown-subject", "Subject: {subject}" }
                    }
                    button { class: "dropdown-logout", onclick: handle_logout,
                        i { class: "fas fa-sign-out-alt" }
                        " Logout"
                    }
                }
            }
        }
        if open() {
            div { class: "overlay", onclick: move |_| open.set(false) }
        }
    }
}
