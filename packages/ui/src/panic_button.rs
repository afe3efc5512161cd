use api::{PanicState, PanicTrigger};
use dioxus::prelude::*;

use crate::icons::FaTriangleExclamation;
use crate::{make_backend, make_session, use_notice, Icon, WebviewLocator};

fn progress_label(state: PanicState) -> Option<&'static str> {
    match state {
        PanicState::Idle => None,
        PanicState::RequestingPermission => Some("Checking permission..."),
        PanicState::AcquiringLocation => Some("Getting your location..."),
        PanicState::Posting => Some("Sending alert..."),
    }
}

/// The big red button. One press sends one alert with the current position.
///
/// Presses while an alert is in progress are ignored.
#[component]
pub fn PanicButton() -> Element {
    let mut notice = use_notice();
    let mut state = use_signal(PanicState::default);

    let onclick = move |_| {
        if !state().is_idle() {
            return;
        }
        spawn(async move {
            let session = make_session();
            let backend = make_backend();
            let mut trigger = PanicTrigger::new();
            let result = trigger
                .fire_with(&session, &WebviewLocator, &backend, |s| state.set(s))
                .await;
            notice.set(Some(result.unwrap_or_else(|e| e.notice())));
        });
    };

    let busy = !state().is_idle();

    rsx! {
        div {
            class: "panic-wrapper",
            button {
                class: "panic-button",
                disabled: busy,
                onclick: onclick,
                Icon { icon: FaTriangleExclamation, width: 72, height: 72 }
                span { class: "panic-label", "PANIC" }
            }
            if let Some(label) = progress_label(state()) {
                p { class: "panic-progress", "{label}" }
            }
        }
    }
}
