use alm_core::modal::ModalProps;
use alm_shared::{CreateLinkRequest, LinkKind};
use dioxus::prelude::*;

use super::{mismatched, FormFooter};
use crate::components::ui::{ErrorBanner, Field, FIELD_CLASS};
use crate::modals::ModalBodyProps;

pub fn link_artifact(body: ModalBodyProps) -> Element {
    let ModalProps::LinkArtifact(props) = &body.props else {
        return mismatched("link_artifact", &body.props);
    };
    let source_title = props.artifact.title.clone();
    let source_id = props.artifact.id.clone();
    let candidates: Vec<_> = props
        .candidates
        .iter()
        .filter(|c| c.id != source_id)
        .cloned()
        .collect();
    let on_create_link = props.on_create_link.clone();
    let error = props.error.clone();

    let mut target = use_signal(String::new);
    let mut kind = use_signal(|| LinkKind::RelatesTo);
    let mut local_error = use_signal(|| None::<String>);

    let guard = body.guard.clone();
    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if guard.is_settled() {
            return;
        }
        let target_id = target();
        if target_id.is_empty() {
            local_error.set(Some("Pick an artifact to link".to_string()));
            return;
        }
        local_error.set(None);
        on_create_link.call(CreateLinkRequest {
            target_id,
            kind: kind(),
        });
    };

    let no_candidates = candidates.is_empty();

    rsx! {
        form { onsubmit: handle_submit,
            div { class: "p-6 space-y-4",
                p { class: "text-sm text-gray-400", "Link \"{source_title}\" to" }
                if no_candidates {
                    p { class: "text-gray-500 italic", "There is nothing else in this project to link." }
                } else {
                    Field { label: "Artifact",
                        select {
                            class: FIELD_CLASS,
                            onchange: move |e: FormEvent| target.set(e.value()),
                            option { value: "", selected: target.read().is_empty(), "Choose…" }
                            for candidate in candidates {
                                option {
                                    key: "{candidate.id}",
                                    value: "{candidate.id}",
                                    selected: *target.read() == candidate.id,
                                    "{candidate.title}"
                                }
                            }
                        }
                    }
                    Field { label: "Relation",
                        select {
                            class: FIELD_CLASS,
                            onchange: move |e: FormEvent| {
                                if let Some(next) = LinkKind::parse(&e.value()) {
                                    kind.set(next);
                                }
                            },
                            for choice in LinkKind::ALL {
                                option {
                                    value: choice.as_str(),
                                    selected: choice == kind(),
                                    "{choice.label()}"
                                }
                            }
                        }
                    }
                }
                ErrorBanner { message: local_error().or(error) }
            }
            FormFooter {
                seq: body.seq,
                guard: body.guard.clone(),
                submit_label: "Link",
                submitting: false,
                disabled: no_candidates,
            }
        }
    }
}
