use alm_core::modal::{ModalProps, SubmitLatch};
use alm_shared::{ArtifactState, ArtifactUpdate};
use dioxus::prelude::*;

use super::{mismatched, non_empty, FormFooter};
use crate::components::ui::{ErrorBanner, Field, FIELD_CLASS};
use crate::modals::ModalBodyProps;

pub fn edit_task(body: ModalBodyProps) -> Element {
    let ModalProps::EditTask(props) = &body.props else {
        return mismatched("edit_task", &body.props);
    };
    let task = props.task.clone();
    let on_submit = props.on_submit.clone();
    let error = props.error.clone();
    let (seq, revision) = (body.seq, body.revision);
    let mut latch = use_signal(SubmitLatch::default);
    let submitting = props.submitting || latch.read().is_pending(seq, revision);

    let mut title = use_signal(|| task.title.clone());
    let mut description = use_signal(|| task.description.clone().unwrap_or_default());
    let mut state = use_signal(|| task.state);
    let mut local_error = use_signal(|| None::<String>);

    let guard = body.guard.clone();
    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if submitting || guard.is_settled() {
            return;
        }
        let Some(new_title) = non_empty(&title.read()) else {
            local_error.set(Some("Title is required".to_string()));
            return;
        };
        let new_description = non_empty(&description.read());
        let update = ArtifactUpdate {
            title: (new_title != task.title).then_some(new_title),
            description: (new_description != task.description)
                .then(|| new_description.unwrap_or_default()),
            state: (state() != task.state).then_some(state()),
            assignee_id: None,
        };
        if update.is_empty() {
            local_error.set(Some("Nothing changed".to_string()));
            return;
        }
        if !latch.write().begin(seq, revision) {
            return;
        }
        local_error.set(None);
        on_submit.call(update);
    };

    rsx! {
        form { onsubmit: handle_submit,
            div { class: "p-6 space-y-4",
                Field { label: "Title",
                    input {
                        class: FIELD_CLASS,
                        r#type: "text",
                        value: "{title}",
                        disabled: submitting,
                        oninput: move |e: FormEvent| title.set(e.value()),
                    }
                }
                Field { label: "Description",
                    textarea {
                        class: "{FIELD_CLASS} min-h-28",
                        value: "{description}",
                        disabled: submitting,
                        oninput: move |e: FormEvent| description.set(e.value()),
                    }
                }
                Field { label: "State",
                    select {
                        class: FIELD_CLASS,
                        disabled: submitting,
                        onchange: move |e: FormEvent| {
                            if let Some(next) = ArtifactState::parse(&e.value()) {
                                state.set(next);
                            }
                        },
                        for choice in ArtifactState::ALL {
                            option {
                                value: choice.as_str(),
                                selected: choice == state(),
                                "{choice.label()}"
                            }
                        }
                    }
                }
                ErrorBanner { message: local_error().or(error) }
            }
            FormFooter {
                seq: body.seq,
                guard: body.guard.clone(),
                submit_label: "Save",
                submitting,
            }
        }
    }
}
