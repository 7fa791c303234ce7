use alm_core::modal::ModalProps;
use alm_shared::Role;
use dioxus::prelude::*;

use super::{mismatched, FOOTER_CLASS};
use crate::components::ui::{button_class, ButtonVariant, ErrorBanner};
use crate::modals::ModalBodyProps;
use crate::stores::dismiss_session;

const ROLE_SELECT_CLASS: &str =
    "rounded-md bg-[#1e1f22] text-gray-100 text-sm px-2 py-1 border border-[#3f4147]";

pub fn project_members(body: ModalBodyProps) -> Element {
    let ModalProps::ProjectMembers(props) = &body.props else {
        return mismatched("project_members", &body.props);
    };
    let project_name = props.project.name.clone();
    let members = props.members.clone();
    let on_change_role = props.on_change_role.clone();
    let on_remove = props.on_remove.clone();
    let error = props.error.clone();
    let (seq, guard) = (body.seq, body.guard.clone());

    rsx! {
        div { class: "p-6 space-y-4",
            p { class: "text-sm text-gray-400", "People with access to {project_name}" }
            if members.is_empty() {
                p { class: "text-gray-500 italic", "No members yet." }
            }
            ul { class: "divide-y divide-[#3f4147]",
                for member in members {
                    li { key: "{member.user_id}", class: "py-3 flex items-center gap-3",
                        div { class: "flex-1 min-w-0",
                            p { class: "text-gray-100 truncate", "{member.display_name}" }
                            p { class: "text-xs text-gray-500 truncate", "{member.email}" }
                        }
                        if member.role == Role::Owner {
                            span { class: "text-xs text-amber-400 px-2", "{Role::Owner.label()}" }
                        } else {
                            select {
                                class: ROLE_SELECT_CLASS,
                                onchange: {
                                    let on_change_role = on_change_role.clone();
                                    let user_id = member.user_id.clone();
                                    move |e: FormEvent| {
                                        if let Some(role) = Role::parse(&e.value()) {
                                            on_change_role.call((user_id.clone(), role));
                                        }
                                    }
                                },
                                for role in Role::assignable() {
                                    option {
                                        value: role.as_str(),
                                        selected: role == member.role,
                                        "{role.label()}"
                                    }
                                }
                            }
                            button {
                                r#type: "button",
                                class: button_class(ButtonVariant::Ghost),
                                title: "Remove from project",
                                onclick: {
                                    let on_remove = on_remove.clone();
                                    let user_id = member.user_id.clone();
                                    move |_| on_remove.call(user_id.clone())
                                },
                                "Remove"
                            }
                        }
                    }
                }
            }
            ErrorBanner { message: error }
        }
        div { class: FOOTER_CLASS,
            button {
                r#type: "button",
                class: button_class(ButtonVariant::Secondary),
                onclick: move |_| dismiss_session(seq, &guard),
                "Close"
            }
        }
    }
}
