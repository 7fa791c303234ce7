use alm_core::modal::{ModalProps, SubmitLatch};
use alm_shared::{validate_project_key, CreateProjectRequest};
use dioxus::prelude::*;

use super::{mismatched, non_empty, FormFooter};
use crate::components::ui::{ErrorBanner, Field, TextInput, FIELD_CLASS};
use crate::modals::ModalBodyProps;

pub fn create_project(body: ModalBodyProps) -> Element {
    let ModalProps::CreateProject(props) = &body.props else {
        return mismatched("create_project", &body.props);
    };
    let on_submit = props.on_submit.clone();
    let error = props.error.clone();
    let (seq, revision) = (body.seq, body.revision);
    let mut latch = use_signal(SubmitLatch::default);
    let submitting = props.submitting || latch.read().is_pending(seq, revision);

    let mut name = use_signal(String::new);
    let mut key = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut local_error = use_signal(|| None::<String>);

    // The body stays mounted between sessions; a submitted draft is not
    // offered again.
    let mut session = use_signal(|| body.seq);
    let mut submitted = use_signal(|| false);
    if *session.peek() != body.seq {
        session.set(body.seq);
        local_error.set(None);
        if *submitted.peek() {
            submitted.set(false);
            name.set(String::new());
            key.set(String::new());
            description.set(String::new());
        }
    }

    let guard = body.guard.clone();
    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if submitting || guard.is_settled() {
            return;
        }
        let Some(project_name) = non_empty(&name.read()) else {
            local_error.set(Some("Project name is required".to_string()));
            return;
        };
        let project_key = key.read().trim().to_uppercase();
        if !validate_project_key(&project_key) {
            local_error.set(Some(
                "Key must be 2-10 uppercase letters or digits, starting with a letter".to_string(),
            ));
            return;
        }
        if !latch.write().begin(seq, revision) {
            return;
        }
        local_error.set(None);
        submitted.set(true);
        on_submit.call(CreateProjectRequest {
            name: project_name,
            key: project_key,
            description: non_empty(&description.read()),
        });
    };

    rsx! {
        form { onsubmit: handle_submit,
            div { class: "p-6 space-y-4",
                Field { label: "Name",
                    TextInput {
                        value: name(),
                        placeholder: "Payments platform",
                        disabled: submitting,
                        oninput: move |e: FormEvent| name.set(e.value()),
                    }
                }
                Field { label: "Key",
                    TextInput {
                        value: key(),
                        placeholder: "PAY",
                        disabled: submitting,
                        oninput: move |e: FormEvent| key.set(e.value().to_uppercase()),
                    }
                }
                Field { label: "Description",
                    textarea {
                        class: "{FIELD_CLASS} min-h-24",
                        value: "{description}",
                        disabled: submitting,
                        oninput: move |e: FormEvent| description.set(e.value()),
                    }
                }
                ErrorBanner { message: local_error().or(error) }
            }
            FormFooter {
                seq: body.seq,
                guard: body.guard.clone(),
                submit_label: "Create project",
                submitting,
            }
        }
    }
}
