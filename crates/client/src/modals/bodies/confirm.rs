use alm_core::modal::ModalProps;
use dioxus::prelude::*;

use super::{confirm_and_close, mismatched, FOOTER_CLASS};
use crate::components::ui::{button_class, ButtonVariant};
use crate::modals::ModalBodyProps;
use crate::stores::dismiss_session;

pub fn confirm(body: ModalBodyProps) -> Element {
    let ModalProps::Confirm(props) = &body.props else {
        return mismatched("confirm", &body.props);
    };
    let message = props.message.clone();
    let confirm_label = props.confirm_label.clone();
    let variant = if props.destructive {
        ButtonVariant::Danger
    } else {
        ButtonVariant::Primary
    };
    let on_confirm = props.on_confirm.clone();
    let (seq, guard) = (body.seq, body.guard.clone());

    rsx! {
        div { class: "p-6",
            p { class: "text-gray-300 whitespace-pre-line", "{message}" }
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
                class: button_class(variant),
                onclick: move |_| confirm_and_close(&body, || on_confirm.call(())),
                "{confirm_label}"
            }
        }
    }
}
