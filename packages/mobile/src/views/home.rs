use api::AdminAction;
use dioxus::prelude::*;
use ui::icons::FaEllipsisVertical;
use ui::{ConfirmDialog, Icon, PanicButton};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let nav = use_navigator();
    let mut notice = ui::use_notice();
    let profile = ui::use_home_profile();
    let mut menu_open = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);

    let handle_delete = move |_| {
        confirm_delete.set(false);
        spawn(async move {
            match api::delete_session(&ui::make_session()).await {
                Ok(done) => {
                    notice.set(Some(done));
                    nav.replace(Route::Register {});
                }
                Err(e) => {
                    tracing::error!("Failed to delete session: {}", e);
                    notice.set(Some(api::Notice::error(
                        "Error",
                        format!("Could not delete the user: {e}"),
                    )));
                }
            }
        });
    };

    let Some(profile) = profile() else {
        return rsx! {
            div {
                class: "screen screen-centered",
                p { class: "spinner-text", "Loading..." }
            }
        };
    };

    let name = profile.name.clone().unwrap_or_default();
    let phone = profile
        .phone
        .clone()
        .unwrap_or_else(|| "Not available".to_string());

    rsx! {
        div {
            class: "screen",
            div {
                class: "screen-header",
                div {
                    h1 { class: "title", "Welcome" }
                    if !name.is_empty() {
                        p { class: "subtitle", "{name}" }
                    }
                }
                div {
                    class: "menu",
                    button {
                        class: "btn-icon",
                        aria_label: "Options",
                        onclick: move |_| menu_open.toggle(),
                        Icon { icon: FaEllipsisVertical, width: 20, height: 20 }
                    }
                    if menu_open() {
                        div {
                            class: "menu-popup",
                            button {
                                class: "menu-item",
                                onclick: move |_| {
                                    menu_open.set(false);
                                    confirm_delete.set(true);
                                },
                                "Delete user"
                            }
                        }
                    }
                }
            }

            p { class: "subtitle", "Your registered number is:" }
            p { class: "phone", "{phone}" }

            PanicButton {}

            if profile.is_admin {
                div {
                    class: "admin-section",
                    h2 { "Administration" }
                    for action in profile.admin_actions().iter().copied() {
                        button {
                            key: "{action.label()}",
                            class: "btn btn-outline btn-block",
                            disabled: !action.is_available(),
                            onclick: move |_| {
                                if action == AdminAction::CreateUser {
                                    nav.push(Route::CreateUser {});
                                }
                            },
                            "{action.label()}"
                        }
                    }
                }
            }
        }

        if confirm_delete() {
            ConfirmDialog {
                title: "Delete user",
                message: "This removes your registration from this device. You will have to register again.",
                confirm_label: "Delete",
                on_confirm: handle_delete,
                on_cancel: move |_| confirm_delete.set(false),
            }
        }
    }
}
