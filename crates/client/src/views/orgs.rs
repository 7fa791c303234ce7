//! Organization picker, the landing screen once signed in.

use alm_core::QueryKey;
use alm_shared::Org;
use dioxus::prelude::*;

use super::{LoadFailed, Loading};
use crate::auth_session::AuthContext;
use crate::hooks::use_query;
use crate::Route;

#[component]
pub fn Orgs() -> Element {
    let auth = use_context::<AuthContext>();
    let orgs = use_query(QueryKey::orgs(), move |_| {
        let client = auth.client();
        async move { client.list_orgs().await }
    });

    rsx! {
        div { class: "max-w-4xl mx-auto p-8",
            h1 { class: "text-2xl font-bold text-white mb-6", "Organizations" }
            match &*orgs.read() {
                None => rsx! { Loading {} },
                Some(Err(e)) => rsx! { LoadFailed { message: e.user_message() } },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "text-gray-400",
                        "You are not a member of any organization yet. Ask an admin for an invitation."
                    }
                },
                Some(Ok(list)) => rsx! {
                    div { class: "grid gap-4 sm:grid-cols-2",
                        for org in list.iter() {
                            OrgTile { key: "{org.id}", org: org.clone() }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn OrgTile(org: Org) -> Element {
    rsx! {
        Link {
            class: "block rounded-xl border border-[#2d2f34] bg-[#1e1f22] p-5 hover:border-indigo-500/60 transition-colors",
            to: Route::Projects { org: org.id.clone() },
            div { class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold text-white truncate", "{org.name}" }
                span { class: "text-xs text-gray-400 uppercase tracking-wide", "{org.role.label()}" }
            }
            p { class: "mt-1 text-sm text-gray-500", "{org.slug}" }
        }
    }
}
