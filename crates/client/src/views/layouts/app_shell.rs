//! Signed-in chrome: top bar, routed content and the modal host.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::components::ui::{button_class, ButtonVariant};
use crate::modals::ModalManager;
use crate::Route;

#[component]
pub fn AppShell() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    // Session gone (logout, or a 401 cleared it): back to the login screen
    use_effect(move || {
        if !auth.is_authenticated() {
            nav.replace(Route::Login {});
        }
    });

    if !auth.is_authenticated() {
        return rsx! {};
    }

    let user_name = auth
        .user()
        .map(|user| user.display_name)
        .unwrap_or_default();

    rsx! {
        div { class: "min-h-screen flex flex-col bg-[#313338] text-gray-100",
            nav { class: "h-14 px-6 flex items-center justify-between bg-[#1e1f22] border-b border-[#2d2f34]",
                Link { class: "text-lg font-bold text-white tracking-tight", to: Route::Orgs {}, "ALM" }
                div { class: "flex items-center gap-4",
                    span { class: "text-sm text-gray-400", "{user_name}" }
                    button {
                        r#type: "button",
                        class: button_class(ButtonVariant::Ghost),
                        onclick: move |_| {
                            auth.logout();
                            nav.replace(Route::Login {});
                        },
                        "Sign out"
                    }
                }
            }
            main { class: "flex-1 min-h-0", Outlet::<Route> {} }
            ModalManager {}
        }
    }
}
