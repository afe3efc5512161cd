use api::Destination;
use dioxus::prelude::*;
use views::{CreateUser, Home, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/register")]
    Register {},
    #[route("/home")]
    Home {},
    #[route("/create-user")]
    CreateUser {},
}

fn main() {
    if let Err(e) = dioxus::logger::init(dioxus::logger::tracing::Level::INFO) {
        eprintln!("Failed to initialize logging: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::NoticeProvider {
            Router::<Route> {}
        }
    }
}

/// Launch gate: a stored phone goes home, anything else goes to registration.
#[component]
fn Root() -> Element {
    let nav = use_navigator();

    let _gate = use_resource(move || async move {
        let destination = match api::initial_route(&ui::make_session()).await {
            Ok(destination) => destination,
            Err(e) => {
                tracing::error!("Failed to read session: {}", e);
                Destination::Register
            }
        };
        match destination {
            Destination::Home => nav.replace(Route::Home {}),
            Destination::Register => nav.replace(Route::Register {}),
        };
    });

    rsx! {
        div {
            class: "screen screen-centered",
            p { class: "spinner-text", "Checking user..." }
        }
    }
}
