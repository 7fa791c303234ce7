//! Screens, one per route.

pub mod board;
pub mod layouts;
pub mod login;
pub mod orgs;
pub mod projects;

pub use board::Board;
pub use layouts::AppShell;
pub use login::Login;
pub use orgs::Orgs;
pub use projects::Projects;

use alm_core::QueryKey;
use dioxus::prelude::*;

use crate::Route;

/// `(org, project)` of a project-scoped query key. Fetchers read ids from
/// the key so a route change never fetches with the previous ids.
fn key_ids(key: &QueryKey) -> (String, String) {
    (
        key.org_id().unwrap_or_default().to_string(),
        key.project_id().unwrap_or_default().to_string(),
    )
}

#[component]
fn Loading() -> Element {
    rsx! {
        div { class: "py-10 text-center text-gray-500 animate-pulse", "Loading…" }
    }
}

#[component]
fn LoadFailed(message: String) -> Element {
    rsx! {
        div { class: "m-6 p-4 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400 text-sm",
            "{message}"
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "flex flex-col items-center justify-center min-h-screen bg-[#313338] text-white gap-4",
            h2 { class: "text-2xl font-bold", "Nothing at /{path}" }
            Link { class: "text-indigo-400 hover:underline", to: Route::Orgs {}, "Back to your organizations" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ids_reads_org_and_project() {
        let key = QueryKey::project_members("acme", "P1");
        assert_eq!(key_ids(&key), ("acme".to_string(), "P1".to_string()));
        assert_eq!(key_ids(&QueryKey::orgs()), (String::new(), String::new()));
    }
}
