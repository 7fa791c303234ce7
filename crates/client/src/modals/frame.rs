use std::cell::Cell;
use std::rc::Rc;

use alm_core::modal::{MaxWidth, TerminalGuard};
use dioxus::prelude::*;

use crate::stores::dismiss_session;

const DIALOG_ID: &str = "alm-modal-dialog";

/// Remember what had focus, lock page scroll and focus the dialog.
const ON_SHOW: &str = r#"
    window.__almReturnFocus = document.activeElement;
    document.body.style.overflow = 'hidden';
    const dialog = document.getElementById('alm-modal-dialog');
    if (dialog) { dialog.focus(); }
"#;

/// Undo `ON_SHOW`.
const ON_HIDE: &str = r#"
    document.body.style.overflow = '';
    const previous = window.__almReturnFocus;
    window.__almReturnFocus = null;
    if (previous && typeof previous.focus === 'function') { previous.focus(); }
"#;

fn width_class(max_width: MaxWidth) -> &'static str {
    match max_width {
        MaxWidth::Xs => "max-w-xs",
        MaxWidth::Sm => "max-w-sm",
        MaxWidth::Md => "max-w-lg",
        MaxWidth::Lg => "max-w-3xl",
    }
}

/// Generic modal chrome: backdrop, title bar with close button, scrollable
/// body. A hidden frame keeps its body mounted without showing it.
#[component]
pub fn ModalFrame(
    seq: u64,
    title: String,
    max_width: MaxWidth,
    visible: bool,
    guard: TerminalGuard,
    children: Element,
) -> Element {
    let mut tracked_visible = use_signal(|| false);
    if *tracked_visible.peek() != visible {
        tracked_visible.set(visible);
    }

    // Whether ON_SHOW is in effect for this frame.
    let showing = use_hook(|| Rc::new(Cell::new(false)));
    {
        let showing = showing.clone();
        use_effect(move || {
            let visible = tracked_visible();
            if visible != showing.get() {
                showing.set(visible);
                let _ = document::eval(if visible { ON_SHOW } else { ON_HIDE });
            }
        });
    }
    use_drop(move || {
        if showing.get() {
            let _ = document::eval(ON_HIDE);
        }
    });

    let dismiss = {
        let guard = guard.clone();
        move || dismiss_session(seq, &guard)
    };
    let dismiss_on_key = dismiss.clone();
    let dismiss_on_button = dismiss.clone();
    let dismiss_on_backdrop = dismiss;

    let dialog_class = format!(
        "relative bg-[#313338] rounded-lg shadow-2xl w-full mx-4 max-h-[85vh] flex flex-col focus:outline-none {}",
        width_class(max_width)
    );
    let aria_hidden = if visible { "false" } else { "true" };
    let root_class = if visible {
        "fixed inset-0 z-50 flex items-center justify-center"
    } else {
        "hidden"
    };

    rsx! {
        div { class: "{root_class}", "aria-hidden": aria_hidden,
            div {
                class: "absolute inset-0 bg-black/70",
                onclick: move |_| dismiss_on_backdrop(),
            }
            div {
                id: DIALOG_ID,
                role: "dialog",
                "aria-modal": "true",
                "aria-label": "{title}",
                tabindex: "-1",
                class: dialog_class,
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Escape {
                        evt.stop_propagation();
                        dismiss_on_key();
                    }
                },
                div { class: "px-6 py-4 border-b border-[#3f4147] flex items-center justify-between",
                    h3 { class: "text-lg font-bold text-white truncate", "{title}" }
                    button {
                        r#type: "button",
                        class: "text-gray-400 hover:text-white transition-colors",
                        "aria-label": "Close",
                        onclick: move |_| dismiss_on_button(),
                        "✕"
                    }
                }
                div { class: "flex-1 overflow-y-auto", {children} }
            }
        }
    }
}

/// Shown until the body's view has resolved.
#[component]
pub fn ModalPlaceholder() -> Element {
    rsx! {
        div { class: "p-6 flex items-center justify-center text-gray-400 text-sm",
            "Loading…"
        }
    }
}
