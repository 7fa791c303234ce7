//! Modal bodies, one per [`ModalId`](alm_core::modal::ModalId).
//!
//! Each body settles its session exactly once: a confirm path that invokes
//! the screen's callback, or the cancel path through [`dismiss_session`].
//! Form bodies hand the request to the screen and stay open; the screen
//! reports back through `update_modal_props` (`submitting`, `error`) and
//! closes the modal when the operation succeeds.
//!
//! [`dismiss_session`]: crate::stores::dismiss_session

use alm_core::modal::{ModalOutcome, ModalProps};
use dioxus::prelude::*;

use super::registry::ModalBodyProps;
use crate::components::ui::{button_class, ButtonVariant};
use crate::stores::{close_session, dismiss_session};

mod confirm;
mod create_artifact;
mod create_project;
mod delete_artifact;
mod edit_task;
mod invite_member;
mod link_artifact;
mod project_members;

pub use confirm::confirm;
pub use create_artifact::create_artifact;
pub use create_project::create_project;
pub use delete_artifact::delete_artifact;
pub use edit_task::edit_task;
pub use invite_member::invite_member;
pub use link_artifact::link_artifact;
pub use project_members::project_members;

const FOOTER_CLASS: &str = "px-6 py-4 border-t border-[#3f4147] flex justify-end gap-3";

/// The registry routed props of another kind to this body.
fn mismatched(expected: &str, props: &ModalProps) -> Element {
    crate::log_error!("{} body received props for '{}'", expected, props.id());
    rsx! {}
}

/// Run the confirm path once, then close the session.
fn confirm_and_close(body: &ModalBodyProps, on_confirm: impl FnOnce()) {
    body.guard.settle(ModalOutcome::Confirmed, on_confirm);
    close_session(body.seq);
}

/// Footer with a cancel button and a submit button for the enclosing form.
#[component]
fn FormFooter(
    seq: u64,
    guard: alm_core::modal::TerminalGuard,
    submit_label: String,
    submitting: bool,
    #[props(default)] disabled: bool,
) -> Element {
    rsx! {
        div { class: FOOTER_CLASS,
            button {
                r#type: "button",
                class: button_class(ButtonVariant::Ghost),
                onclick: move |_| dismiss_session(seq, &guard),
                "Cancel"
            }
            button {
                r#type: "submit",
                class: button_class(ButtonVariant::Primary),
                disabled: submitting || disabled,
                if submitting {
                    "Saving…"
                } else {
                    "{submit_label}"
                }
            }
        }
    }
}

/// Trimmed text, `None` when blank.
fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_trims_and_drops_blank() {
        assert_eq!(non_empty("  Fix login  ").as_deref(), Some("Fix login"));
        assert_eq!(non_empty("   "), None);
    }
}
