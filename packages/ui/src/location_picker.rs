use api::{cascade::fetch_options, Level, LocationCascade};
use dioxus::prelude::*;

use crate::make_backend;

/// Five dependent dropdowns bound to `cascade`.
///
/// The owner loads the department list; picking a value here fetches the next
/// level. A level stays disabled until its parent has a selection.
#[component]
pub fn LocationPicker(cascade: Signal<LocationCascade>) -> Element {
    rsx! {
        for level in Level::ALL {
            LevelSelect { key: "{level.wire_prefix()}", level, cascade }
        }
    }
}

#[component]
fn LevelSelect(level: Level, cascade: Signal<LocationCascade>) -> Element {
    let mut cascade = cascade;
    let onchange = move |evt: FormEvent| {
        let Ok(id) = evt.value().parse::<i64>() else {
            cascade.write().deselect(level);
            return;
        };
        let Some(fetch) = cascade.write().select(level, id) else {
            return;
        };
        spawn(async move {
            let result = fetch_options(&make_backend(), &fetch).await;
            cascade.write().apply_options(&fetch, result);
        });
    };

    let current = cascade.read();
    let enabled = current.is_enabled(level);
    let selected = current.selected(level);
    let label = level.label();
    let id = format!("level-{}", level.wire_prefix().to_lowercase());

    rsx! {
        div {
            class: "field",
            label { r#for: "{id}", "{label}" }
            select {
                id: "{id}",
                class: "input",
                disabled: !enabled,
                onchange,
                option { value: "", selected: selected.is_none(), "Select {label.to_lowercase()}" }
                for opt in current.options(level) {
                    option {
                        key: "{opt.id}",
                        value: "{opt.id}",
                        selected: selected == Some(opt.id),
                        "{opt.name}"
                    }
                }
            }
            if let Some(error) = current.load_error(level) {
                p { class: "field-error", "{error}" }
            }
        }
    }
}
