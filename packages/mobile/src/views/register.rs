use api::{Registration, Step};
use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Register() -> Element {
    let nav = use_navigator();
    let mut notice = ui::use_notice();
    let mut form = use_signal(Registration::new);
    let mut accepted_terms = use_signal(|| false);

    // Someone already registered on this device skips the form.
    let _redirect = use_resource(move || async move {
        match ui::make_session().is_registered().await {
            Ok(true) => {
                nav.replace(Route::Home {});
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("Failed to read session: {}", e),
        }
    });

    let handle_validate = move |_| {
        if form.read().is_busy() {
            return;
        }
        let mut flow = form();
        form.write().mark_in_flight();
        spawn(async move {
            let result = flow
                .validate(&ui::make_backend(), &ui::make_session())
                .await;
            form.set(flow);
            notice.set(Some(result.unwrap_or_else(|e| e.notice())));
        });
    };

    let handle_confirm = move |_| {
        if form.read().is_busy() {
            return;
        }
        let mut flow = form();
        form.write().mark_in_flight();
        spawn(async move {
            let result = flow
                .confirm(&ui::make_backend(), &ui::make_session(), accepted_terms())
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
    let on_code_step = current.step() == Step::Code;

    rsx! {
        div {
            class: "screen",
            h1 { class: "title", "Registration" }

            div {
                class: "field",
                label { r#for: "phone", "Phone number" }
                input {
                    id: "phone",
                    class: "input",
                    r#type: "tel",
                    placeholder: "3001234567",
                    disabled: current.phone_locked() || busy,
                    value: "{current.phone}",
                    oninput: move |evt: FormEvent| form.write().phone = evt.value(),
                }
            }

            if on_code_step {
                div {
                    class: "field",
                    label { r#for: "name", "Full name" }
                    input {
                        id: "name",
                        class: "input",
                        r#type: "text",
                        disabled: busy,
                        value: "{current.name}",
                        oninput: move |evt: FormEvent| form.write().name = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "code", "Verification code" }
                    input {
                        id: "code",
                        class: "input",
                        r#type: "text",
                        inputmode: "numeric",
                        disabled: busy,
                        value: "{current.code}",
                        oninput: move |evt: FormEvent| form.write().code = evt.value(),
                    }
                }
                label {
                    class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: accepted_terms(),
                        onclick: move |_| accepted_terms.toggle(),
                    }
                    "I accept the terms and conditions"
                }
            }

            if let Some(error) = current.status().error() {
                p { class: "form-error", "{error}" }
            }

            if on_code_step {
                button {
                    class: "btn btn-primary btn-block",
                    disabled: busy,
                    onclick: handle_confirm,
                    if busy { "Verifying..." } else { "Confirm" }
                }
                button {
                    class: "btn btn-outline btn-block",
                    disabled: busy,
                    onclick: move |_| {
                        form.write().reset();
                        accepted_terms.set(false);
                    },
                    "Change phone number"
                }
            } else {
                button {
                    class: "btn btn-primary btn-block",
                    disabled: busy,
                    onclick: handle_validate,
                    if busy { "Validating..." } else { "Validate" }
                }
            }
        }
    }
}
