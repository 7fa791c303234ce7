use alm_core::modal::{ModalProps, SubmitLatch};
use alm_shared::{InviteMemberRequest, Role};
use dioxus::prelude::*;

use super::{mismatched, FormFooter};
use crate::components::ui::{ErrorBanner, Field, InputType, TextInput, FIELD_CLASS};
use crate::modals::ModalBodyProps;

pub fn invite_member(body: ModalBodyProps) -> Element {
    let ModalProps::InviteMember(props) = &body.props else {
        return mismatched("invite_member", &body.props);
    };
    let on_invite = props.on_invite.clone();
    let error = props.error.clone();
    let (seq, revision) = (body.seq, body.revision);
    let mut latch = use_signal(SubmitLatch::default);
    let submitting = props.submitting || latch.read().is_pending(seq, revision);

    let mut email = use_signal(String::new);
    let mut role = use_signal(|| Role::Member);
    let mut local_error = use_signal(|| None::<String>);

    let guard = body.guard.clone();
    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if submitting || guard.is_settled() {
            return;
        }
        let address = email.read().trim().to_string();
        if !looks_like_email(&address) {
            local_error.set(Some("Enter a valid email address".to_string()));
            return;
        }
        if !latch.write().begin(seq, revision) {
            return;
        }
        local_error.set(None);
        on_invite.call(InviteMemberRequest {
            email: address,
            role: role(),
        });
    };

    rsx! {
        form { onsubmit: handle_submit,
            div { class: "p-6 space-y-4",
                Field { label: "Email",
                    TextInput {
                        value: email(),
                        input_type: InputType::Email,
                        placeholder: "teammate@example.com",
                        disabled: submitting,
                        oninput: move |e: FormEvent| email.set(e.value()),
                    }
                }
                Field { label: "Role",
                    select {
                        class: FIELD_CLASS,
                        disabled: submitting,
                        onchange: move |e: FormEvent| {
                            if let Some(next) = Role::parse(&e.value()) {
                                role.set(next);
                            }
                        },
                        for choice in Role::assignable() {
                            option {
                                value: choice.as_str(),
                                selected: choice == role(),
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
                submit_label: "Send invite",
                submitting,
            }
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::looks_like_email;

    #[test]
    fn email_check_is_shallow() {
        assert!(looks_like_email("ana@example.com"));
        assert!(!looks_like_email("ana@localhost"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ana.example.com"));
    }
}
