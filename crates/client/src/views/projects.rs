//! Projects of one organization, with project creation, invitations and
//! per-project member management.

use alm_core::modal::{
    CreateProjectPatch, CreateProjectProps, InviteMemberPatch, InviteMemberProps, ModalId,
    ModalProps, OpenModal, ProjectMembersPatch, ProjectMembersProps,
};
use alm_core::{Handler, QueryKey, Severity};
use alm_shared::{ApiError, CreateProjectRequest, InviteMemberRequest, Project, ProjectRef, Role};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;

use super::{LoadFailed, Loading};
use crate::api_client::ApiClient;
use crate::auth_session::AuthContext;
use crate::components::ui::{button_class, ButtonVariant};
use crate::hooks::use_query;
use crate::stores::{
    close_if_open, invalidate_prefix, modal_api, notify, update_modal_props, MODAL,
};
use crate::Route;

enum ProjectsAction {
    Create(String, CreateProjectRequest),
    Invite(String, InviteMemberRequest),
    LoadMembers(ProjectRef),
    ChangeRole(ProjectRef, String, Role),
    Remove(ProjectRef, String),
}

#[component]
pub fn Projects(org: String) -> Element {
    let auth = use_context::<AuthContext>();

    let projects = use_query(QueryKey::org_projects(&org), move |key: QueryKey| {
        let client = auth.client();
        async move {
            let org = key.org_id().unwrap_or_default();
            client.list_projects(org).await
        }
    });

    // Runs in this screen's scope, so requests outlive the modal that
    // started them.
    let actions = use_coroutine(move |mut rx: UnboundedReceiver<ProjectsAction>| async move {
        while let Some(action) = rx.next().await {
            let client = auth.client();
            match action {
                ProjectsAction::Create(org, request) => create_project(&client, &org, request).await,
                ProjectsAction::Invite(org, request) => invite_member(&client, &org, request).await,
                ProjectsAction::LoadMembers(project) => {
                    refresh_members(&client, &project, Ok(())).await
                }
                ProjectsAction::ChangeRole(project, user_id, role) => {
                    let result = client
                        .update_member_role(&project.org_id, &project.id, &user_id, role)
                        .await
                        .map(|member| {
                            notify(
                                format!("{} is now {}", member.display_name, member.role.label()),
                                Severity::Success,
                            );
                        });
                    refresh_members(&client, &project, result).await;
                }
                ProjectsAction::Remove(project, user_id) => {
                    let result = client
                        .remove_member(&project.org_id, &project.id, &user_id)
                        .await
                        .map(|()| {
                            notify("Member removed", Severity::Success);
                        });
                    refresh_members(&client, &project, result).await;
                }
            }
        }
    });

    let open_create = {
        let org = org.clone();
        move |_: MouseEvent| {
            let on_submit = Handler::new({
                let org = org.clone();
                move |request| actions.send(ProjectsAction::Create(org.clone(), request))
            });
            modal_api().open_create_project(CreateProjectProps::new(org.clone(), on_submit), None);
        }
    };

    let open_invite = {
        let org = org.clone();
        move |_: MouseEvent| {
            let on_invite = Handler::new({
                let org = org.clone();
                move |request| actions.send(ProjectsAction::Invite(org.clone(), request))
            });
            modal_api().open_invite_member(InviteMemberProps::new(org.clone(), on_invite), None);
        }
    };

    // The modal opens right away and fills in once the member list arrives.
    let open_members = move |project: ProjectRef| {
        let on_change_role = Handler::new({
            let project = project.clone();
            move |(user_id, role): (String, Role)| {
                actions.send(ProjectsAction::ChangeRole(project.clone(), user_id, role))
            }
        });
        let on_remove = Handler::new({
            let project = project.clone();
            move |user_id: String| actions.send(ProjectsAction::Remove(project.clone(), user_id))
        });
        modal_api().open_project_members(
            ProjectMembersProps::new(project.clone(), Vec::new(), on_change_role, on_remove),
            None,
        );
        actions.send(ProjectsAction::LoadMembers(project));
    };

    rsx! {
        div { class: "max-w-5xl mx-auto p-8",
            div { class: "flex items-center justify-between mb-6 gap-4",
                div {
                    Link { class: "text-sm text-gray-400 hover:text-white", to: Route::Orgs {}, "← Organizations" }
                    h1 { class: "text-2xl font-bold text-white mt-1", "Projects" }
                }
                div { class: "flex gap-3",
                    button {
                        r#type: "button",
                        class: button_class(ButtonVariant::Secondary),
                        onclick: open_invite,
                        "Invite member"
                    }
                    button {
                        r#type: "button",
                        class: button_class(ButtonVariant::Primary),
                        onclick: open_create,
                        "New project"
                    }
                }
            }
            match &*projects.read() {
                None => rsx! { Loading {} },
                Some(Err(e)) => rsx! { LoadFailed { message: e.user_message() } },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "text-gray-400", "No projects yet. Create the first one." }
                },
                Some(Ok(list)) => rsx! {
                    div { class: "space-y-3",
                        for project in list.iter() {
                            ProjectRow {
                                key: "{project.id}",
                                project: project.clone(),
                                on_members: open_members,
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ProjectRow(project: Project, on_members: EventHandler<ProjectRef>) -> Element {
    let project_ref = ProjectRef::from(&project);
    let description = project.description.clone().unwrap_or_default();

    rsx! {
        div { class: "flex items-center gap-4 rounded-xl border border-[#2d2f34] bg-[#1e1f22] px-5 py-4",
            span { class: "font-mono text-xs text-indigo-300 bg-indigo-500/10 rounded px-2 py-1", "{project.key}" }
            Link {
                class: "flex-1 min-w-0",
                to: Route::Board { org: project.org_id.clone(), project: project.id.clone() },
                p { class: "text-white font-semibold truncate", "{project.name}" }
                if !description.is_empty() {
                    p { class: "text-sm text-gray-500 truncate", "{description}" }
                }
            }
            button {
                r#type: "button",
                class: button_class(ButtonVariant::Ghost),
                onclick: move |_| on_members.call(project_ref.clone()),
                "Members"
            }
        }
    }
}

async fn create_project(client: &ApiClient, org: &str, request: CreateProjectRequest) {
    update_modal_props(CreateProjectPatch {
        submitting: Some(true),
        error: Some(None),
        ..Default::default()
    });
    match client.create_project(org, &request).await {
        Ok(project) => {
            update_modal_props(CreateProjectPatch {
                submitting: Some(false),
                ..Default::default()
            });
            close_if_open(ModalId::CreateProject);
            invalidate_prefix(&QueryKey::org_projects(org));
            notify(format!("Project {} created", project.name), Severity::Success);
        }
        Err(e) => {
            crate::log_warn!("create project failed: {}", e);
            update_modal_props(CreateProjectPatch {
                submitting: Some(false),
                error: Some(Some(e.user_message())),
                ..Default::default()
            });
        }
    }
}

async fn invite_member(client: &ApiClient, org: &str, request: InviteMemberRequest) {
    update_modal_props(InviteMemberPatch {
        submitting: Some(true),
        error: Some(None),
        ..Default::default()
    });
    match client.invite_member(org, &request).await {
        Ok(()) => {
            update_modal_props(InviteMemberPatch {
                submitting: Some(false),
                ..Default::default()
            });
            close_if_open(ModalId::InviteMember);
            notify(format!("Invitation sent to {}", request.email), Severity::Success);
        }
        Err(e) => {
            crate::log_warn!("invite failed: {}", e);
            update_modal_props(InviteMemberPatch {
                submitting: Some(false),
                error: Some(Some(e.user_message())),
                ..Default::default()
            });
        }
    }
}

/// Report the outcome of a member change and reload the list into the open
/// members modal. A failure for a project whose modal has closed becomes a
/// notification instead.
async fn refresh_members(client: &ApiClient, project: &ProjectRef, outcome: Result<(), ApiError>) {
    if let Err(e) = outcome {
        crate::log_warn!("member update failed: {}", e);
        if showing_members_of(project) {
            update_modal_props(ProjectMembersPatch {
                error: Some(Some(e.user_message())),
                ..Default::default()
            });
        } else {
            notify(e.user_message(), Severity::Error);
        }
        return;
    }
    invalidate_prefix(&QueryKey::project_members(&project.org_id, &project.id));
    if !showing_members_of(project) {
        return;
    }
    let result = client.list_members(&project.org_id, &project.id).await;
    // The user may have moved on while the list loaded.
    if !showing_members_of(project) {
        return;
    }
    match result {
        Ok(members) => {
            update_modal_props(ProjectMembersPatch {
                members: Some(members),
                error: Some(None),
                ..Default::default()
            });
        }
        Err(e) => {
            update_modal_props(ProjectMembersPatch {
                error: Some(Some(e.user_message())),
                ..Default::default()
            });
        }
    }
}

/// Whether the open modal is the member list of `project`; patches for a
/// project the user already left are dropped.
fn showing_members_of(project: &ProjectRef) -> bool {
    lists_members_of(MODAL.peek().current(), project)
}

fn lists_members_of(open: Option<&OpenModal>, project: &ProjectRef) -> bool {
    open.is_some_and(|open| {
        matches!(&open.props, ModalProps::ProjectMembers(props) if props.project.id == project.id)
    })
}
