//! Sign-in screen.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::components::ui::{
    Button, ButtonVariant, Card, CardBody, CardHeader, ErrorBanner, Field, InputType, TextInput,
};
use crate::Route;

#[component]
pub fn Login() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let mut api_base = use_signal(|| auth.api_base.peek().clone());
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_loading = use_signal(|| false);

    // Already signed in (restored session): go straight to the app
    use_effect(move || {
        if auth.is_authenticated() {
            nav.replace(Route::Orgs {});
        }
    });

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if is_loading() {
            return;
        }
        let base = api_base.read().trim().trim_end_matches('/').to_string();
        let address = email.read().trim().to_string();
        let secret = password.read().clone();
        if base.is_empty() || address.is_empty() || secret.is_empty() {
            error.set(Some("Server, email and password are all required".to_string()));
            return;
        }

        error.set(None);
        is_loading.set(true);
        auth.api_base.set(base);
        spawn(async move {
            match auth.login(address, secret).await {
                Ok(()) => {
                    nav.replace(Route::Orgs {});
                }
                Err(err) => {
                    crate::log_warn!("login failed: {}", err);
                    error.set(Some(if err.is_unauthorized() {
                        "Wrong email or password".to_string()
                    } else {
                        err.user_message()
                    }));
                    is_loading.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-[#313338] px-4",
            Card { class: "w-full max-w-md",
                CardHeader {
                    title: "Sign in",
                    subtitle: "Track requirements, tasks and bugs with your team",
                }
                CardBody {
                    form { class: "space-y-4", onsubmit: handle_submit,
                        Field { label: "Server",
                            TextInput {
                                value: api_base(),
                                placeholder: "https://alm.example.com",
                                disabled: is_loading(),
                                oninput: move |e: FormEvent| api_base.set(e.value()),
                            }
                        }
                        Field { label: "Email",
                            TextInput {
                                value: email(),
                                input_type: InputType::Email,
                                placeholder: "you@example.com",
                                disabled: is_loading(),
                                oninput: move |e: FormEvent| email.set(e.value()),
                            }
                        }
                        Field { label: "Password",
                            TextInput {
                                value: password(),
                                input_type: InputType::Password,
                                disabled: is_loading(),
                                oninput: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        ErrorBanner { message: error() }
                        Button {
                            class: "w-full",
                            variant: ButtonVariant::Primary,
                            r#type: "submit",
                            disabled: is_loading(),
                            if is_loading() {
                                "Signing in…"
                            } else {
                                "Sign in"
                            }
                        }
                    }
                }
            }
        }
    }
}
