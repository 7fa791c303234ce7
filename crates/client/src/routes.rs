//! Application routing configuration.

use dioxus::prelude::*;

use crate::views::{AppShell, Board, Login, NotFound, Orgs, Projects};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login")]
    Login {},

    // Everything behind the session lives inside the shell
    #[layout(AppShell)]
        #[route("/")]
        Orgs {},
        #[route("/orgs/:org")]
        Projects { org: String },
        #[route("/orgs/:org/projects/:project")]
        Board { org: String, project: String },
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
