use api::{CreateUserForm, LocationCascade};
use dioxus::prelude::*;
use ui::LocationPicker;

use crate::Route;

#[component]
pub fn CreateUser() -> Element {
    let nav = use_navigator();
    let mut notice = ui::use_notice();
    let mut form = use_signal(CreateUserForm::new);
    let mut cascade = use_signal(LocationCascade::new);

    let _departments = use_resource(move || async move {
        let mut loaded = LocationCascade::new();
        loaded.load_departments(&ui::make_backend()).await;
        cascade.set(loaded);
    });

    let handle_submit = move |_| {
        if form.read().is_busy() {
            return;
        }
        let mut flow = form();
        let snapshot = cascade();
        form.write().mark_in_flight();
        spawn(async move {
            let service_id = ui::app_config().service.service_id;
            let result = flow
                .submit(&ui::make_backend(), &snapshot, service_id)
                .await;
            form.set(flow);
            match result {
                Ok(done) => {
                    notice.set(Some(done));
                    nav.replace(Route::Home {});
                }
                Err(e) => notice.set(Some(e.notice())),
            }
        });
    };

    let current = form.read();
    let busy = current.is_busy();

    rsx! {
        div {
            class: "screen",
            h1 { class: "title", "Create user" }

            div {
                class: "field",
                label { r#for: "user-name", "Name" }
                input {
                    id: "user-name",
                    class: "input",
                    r#type: "text",
                    value: "{current.draft.name}",
                    oninput: move |evt: FormEvent| form.write().draft.name = evt.value(),
                }
            }
            div {
                class: "field",
                label { r#for: "user-email", "Email" }
                input {
                    id: "user-email",
                    class: "input",
                    r#type: "email",
                    value: "{current.draft.email}",
                    oninput: move |evt: FormEvent| form.write().draft.email = evt.value(),
                }
            }
            div {
                class: "field",
                label { r#for: "user-phone", "Phone" }
                input {
                    id: "user-phone",
                    class: "input",
                    r#type: "tel",
                    value: "{current.draft.phone}",
                    oninput: move |evt: FormEvent| form.write().draft.phone = evt.value(),
                }
            }

            LocationPicker { cascade }

            if let Some(error) = current.status().error() {
                p { class: "form-error", "{error}" }
            }

            button {
                class: "btn btn-primary btn-block",
                disabled: busy,
                onclick: handle_submit,
                if busy { "Creating..." } else { "Create user" }
            }
            button {
                class: "btn btn-outline btn-block",
                disabled: busy,
                onclick: move |_| {
                    nav.go_back();
                },
                "Cancel"
            }
        }
    }
}
