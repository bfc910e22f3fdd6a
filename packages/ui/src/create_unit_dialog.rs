use dioxus::prelude::*;

/// Modal form for creating a new unit.
#[component]
pub fn CreateUnitDialog(
    creating: bool,
    on_create: EventHandler<String>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut name = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        on_create.call(name().trim().to_string());
    };

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| {
                if !creating {
                    on_cancel.call(());
                }
            },
        }
        div { class: "modal",
            div { class: "modal-header",
                h2 { "Create New Unit" }
                button {
                    class: "close-btn",
                    disabled: creating,
                    onclick: move |_| on_cancel.call(()),
                    i { class: "fas fa-times" }
                }
            }

            form { onsubmit: handle_submit,
                div { class: "form-group",
                    label { r#for: "unit-name", "Unit Name" }
                    input {
                        id: "unit-name",
                        r#type: "text",
                        placeholder: "e.g., Chapter 1: Introduction",
                        value: name(),
                        disabled: creating,
                        required: true,
                        autofocus: true,
                        oninput: move |evt| name.set(evt.value()),
                    }
                }

                div { class: "modal-actions",
                    button {
                        r#type: "button",
                        class: "cancel-btn",
                        disabled: creating,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "submit-btn",
                        disabled: creating || name().trim().is_empty(),
                        if creating {
                            i { class: "fas fa-spinner fa-spin" }
                            " Creating..."
                        } else {
                            i { class: "fas fa-check" }
                            " Create Unit"
                        }
                    }
                }
            }
        }
    }
}
