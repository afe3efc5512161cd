use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a card.
///
/// Tapping outside the card calls `on_dismiss` when one is given. Blocking
/// dialogs leave it out so only their own buttons close them.
#[component]
pub fn ModalOverlay(on_dismiss: Option<EventHandler<()>>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| {
                if let Some(handler) = on_dismiss {
                    handler.call(());
                }
            },
            div {
                class: "modal-card",
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Two-button confirmation. The confirm button is styled as destructive.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            on_dismiss: on_cancel,
            h2 { class: "modal-title", "{title}" }
            p { class: "modal-message", "{message}" }
            div {
                class: "modal-actions",
                button {
                    class: "btn btn-outline",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-danger",
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}
