use dioxus::prelude::*;

use ui::SessionProvider;
use views::{Login, Signup, StudentDashboard, TeacherDashboard};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[route("/student")]
    StudentDashboard {},
    #[route("/teacher")]
    TeacherDashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const FONT_AWESOME: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css";

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: FONT_AWESOME }

        SessionProvider {
            Router::<Route> {}
        }
    }
}
