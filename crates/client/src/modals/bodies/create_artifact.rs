use alm_core::modal::{ModalProps, SubmitLatch};
use alm_shared::{ArtifactKind, ArtifactState, CreateArtifactRequest};
use dioxus::prelude::*;

use super::{mismatched, non_empty, FormFooter};
use crate::components::ui::{ErrorBanner, Field, TextInput, FIELD_CLASS};
use crate::modals::ModalBodyProps;

pub fn create_artifact(body: ModalBodyProps) -> Element {
    let ModalProps::CreateArtifact(props) = &body.props else {
        return mismatched("create_artifact", &body.props);
    };
    let project_name = props.project.name.clone();
    let on_submit = props.on_submit.clone();
    let error = props.error.clone();
    let (seq, revision) = (body.seq, body.revision);
    let mut latch = use_signal(SubmitLatch::default);
    let submitting = props.submitting || latch.read().is_pending(seq, revision);
    let initial_state = props.initial_state;

    let mut kind = use_signal(|| ArtifactKind::Task);
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut state = use_signal(|| initial_state);
    let mut local_error = use_signal(|| None::<String>);

    // The body stays mounted between sessions. A new session starts in the
    // column it was opened from, and blank if the last draft was submitted.
    let mut session = use_signal(|| body.seq);
    let mut submitted = use_signal(|| false);
    if *session.peek() != body.seq {
        session.set(body.seq);
        state.set(initial_state);
        local_error.set(None);
        if *submitted.peek() {
            submitted.set(false);
            title.set(String::new());
            description.set(String::new());
        }
    }

    let guard = body.guard.clone();
    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if submitting || guard.is_settled() {
            return;
        }
        let Some(artifact_title) = non_empty(&title.read()) else {
            local_error.set(Some("Title is required".to_string()));
            return;
        };
        if !latch.write().begin(seq, revision) {
            return;
        }
        local_error.set(None);
        submitted.set(true);
        on_submit.call(CreateArtifactRequest {
            kind: kind(),
            title: artifact_title,
            description: non_empty(&description.read()),
            state: state(),
        });
    };

    rsx! {
        form { onsubmit: handle_submit,
            div { class: "p-6 space-y-4",
                p { class: "text-sm text-gray-400", "New artifact in {project_name}" }
                div { class: "grid grid-cols-2 gap-4",
                    Field { label: "Kind",
                        select {
                            class: FIELD_CLASS,
                            disabled: submitting,
                            onchange: move |e: FormEvent| {
                                if let Some(next) = ArtifactKind::parse(&e.value()) {
                                    kind.set(next);
                                }
                            },
                            for choice in ArtifactKind::ALL {
                                option {
                                    value: choice.as_str(),
                                    selected: choice == kind(),
                                    "{choice.label()}"
                                }
                            }
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
                }
                Field { label: "Title",
                    TextInput {
                        value: title(),
                        placeholder: "Short summary",
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
                ErrorBanner { message: local_error().or(error) }
            }
            FormFooter {
                seq: body.seq,
                guard: body.guard.clone(),
                submit_label: "Create",
                submitting,
            }
        }
    }
}
