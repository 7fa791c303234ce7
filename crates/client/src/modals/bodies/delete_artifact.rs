use alm_core::modal::ModalProps;
use dioxus::prelude::*;

use super::{confirm_and_close, mismatched, FOOTER_CLASS};
use crate::components::ui::{button_class, ButtonVariant};
use crate::modals::ModalBodyProps;
use crate::stores::dismiss_session;

pub fn delete_artifact(body: ModalBodyProps) -> Element {
    let ModalProps::DeleteArtifact(props) = &body.props else {
        return mismatched("delete_artifact", &body.props);
    };
    let title = props.artifact.title.clone();
    let on_confirm = props.on_confirm.clone();
    let (seq, guard) = (body.seq, body.guard.clone());

    rsx! {
        div { class: "p-6 space-y-2",
            p { class: "text-gray-300",
                "Delete "
                span { class: "font-semibold text-white", "\"{title}\"" }
                "?"
            }
            p { class: "text-sm text-gray-400",
                "Links and history go with it. This cannot be undone."
            }
        }
        div { class: FOOTER_CLASS,
            button {
                r#type: "button",
                class: button_class(ButtonVariant::Ghost),
                onclick: move |_| dismiss_session(seq, &guard),
                "Cancel"
            }
            button {
                r#type: "button",
                class: button_class(ButtonVariant::Danger),
                onclick: move |_| confirm_and_close(&body, || on_confirm.call(())),
                "Delete"
            }
        }
    }
}
