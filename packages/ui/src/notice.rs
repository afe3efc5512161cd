//! Blocking notice dialog shared by every screen.
//!
//! Flows hand back an [`api::Notice`]; screens put it in the context signal and the
//! provider shows it above whatever route is active, so a screen may navigate away
//! right after posting a notice.

use api::{Notice, NoticeKind};
use dioxus::prelude::*;

/// The notice currently on screen. Setting it replaces any notice still open.
pub fn use_notice() -> Signal<Option<Notice>> {
    use_context::<Signal<Option<Notice>>>()
}

#[component]
pub fn NoticeProvider(children: Element) -> Element {
    let mut notice = use_context_provider(|| Signal::new(Option::<Notice>::None));

    rsx! {
        {children}
        if let Some(current) = notice() {
            crate::ModalOverlay {
                h2 { class: "modal-title {kind_class(current.kind)}", "{current.title}" }
                p { class: "modal-message", "{current.message}" }
                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| notice.set(None),
                        "OK"
                    }
                }
            }
        }
    }
}

fn kind_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => "notice-info",
        NoticeKind::Success => "notice-success",
        NoticeKind::Warning => "notice-warning",
        NoticeKind::Error => "notice-error",
    }
}
