use alm_core::Severity;
use dioxus::prelude::*;

use crate::config::client_config;
use crate::platform::sleep;
use crate::stores::{dismiss, NOTIFICATIONS};

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "border-indigo-500/40 bg-indigo-500/10 text-indigo-100",
        Severity::Success => "border-emerald-500/40 bg-emerald-500/10 text-emerald-100",
        Severity::Warning => "border-amber-500/40 bg-amber-500/10 text-amber-100",
        Severity::Error => "border-red-500/40 bg-red-500/10 text-red-100",
    }
}

/// Stack of toasts in the bottom-right corner.
#[component]
pub fn Toaster() -> Element {
    let toasts: Vec<_> = NOTIFICATIONS.read().iter().cloned().collect();

    rsx! {
        div {
            class: "fixed bottom-4 right-4 z-[60] flex flex-col gap-2 w-80",
            role: "status",
            aria_live: "polite",
            for toast in toasts {
                Toast {
                    key: "{toast.id}",
                    id: toast.id,
                    message: toast.message,
                    severity: toast.severity,
                }
            }
        }
    }
}

#[component]
fn Toast(id: u64, message: String, severity: Severity) -> Element {
    // Expires with the component: a toast dismissed by hand stops its timer.
    use_future(move || async move {
        sleep(client_config().notification_ttl).await;
        dismiss(id);
    });

    let class = format!(
        "flex items-start gap-3 rounded-lg border px-4 py-3 text-sm shadow-lg backdrop-blur {}",
        severity_class(severity)
    );

    rsx! {
        div { class,
            p { class: "flex-1", "{message}" }
            button {
                r#type: "button",
                class: "text-current opacity-60 hover:opacity-100",
                aria_label: "Dismiss",
                onclick: move |_| dismiss(id),
                "✕"
            }
        }
    }
}
