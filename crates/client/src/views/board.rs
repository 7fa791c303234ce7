//! Kanban board of one project: a column per workflow state.

use alm_core::modal::{
    ConfirmProps, CreateArtifactPatch, CreateArtifactProps, DeleteArtifactProps, EditTaskPatch,
    EditTaskProps, LinkArtifactPatch, LinkArtifactProps, ModalId,
};
use alm_core::{Handler, QueryKey, Severity};
use alm_shared::{
    Artifact, ArtifactRef, ArtifactState, ArtifactUpdate, CreateArtifactRequest,
    CreateLinkRequest, ProjectRef,
};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;

use super::{key_ids, LoadFailed, Loading};
use crate::api_client::ApiClient;
use crate::auth_session::AuthContext;
use crate::components::ui::{button_class, ButtonVariant};
use crate::hooks::use_query;
use crate::stores::{close_if_open, invalidate_prefix, modal_api, notify, update_modal_props};
use crate::Route;

enum BoardAction {
    Create(CreateArtifactRequest),
    Update(String, ArtifactUpdate),
    Advance(String, ArtifactState),
    Delete(String),
    Link(String, CreateLinkRequest),
}

/// Which project the board shows; the coroutine reads it per action.
#[derive(Clone, PartialEq)]
struct BoardScope {
    org: String,
    project: String,
}

impl BoardScope {
    fn project_key(&self) -> QueryKey {
        QueryKey::project(&self.org, &self.project)
    }
}

#[component]
pub fn Board(org: String, project: String) -> Element {
    let auth = use_context::<AuthContext>();

    let mut scope = use_signal(|| BoardScope {
        org: org.clone(),
        project: project.clone(),
    });
    if scope.peek().org != org || scope.peek().project != project {
        scope.set(BoardScope {
            org: org.clone(),
            project: project.clone(),
        });
    }

    let details = use_query(QueryKey::project(&org, &project), move |key: QueryKey| {
        let client = auth.client();
        async move {
            let (org, project) = key_ids(&key);
            client.get_project(&org, &project).await
        }
    });
    let artifacts = use_query(QueryKey::project_artifacts(&org, &project), move |key: QueryKey| {
        let client = auth.client();
        async move {
            let (org, project) = key_ids(&key);
            client.list_artifacts(&org, &project).await
        }
    });

    let actions = use_coroutine(move |mut rx: UnboundedReceiver<BoardAction>| async move {
        while let Some(action) = rx.next().await {
            let client = auth.client();
            let scope = scope.peek().clone();
            match action {
                BoardAction::Create(request) => create_artifact(&client, &scope, request).await,
                BoardAction::Update(id, update) => update_artifact(&client, &scope, &id, update).await,
                BoardAction::Advance(id, next) => advance_artifact(&client, &scope, &id, next).await,
                BoardAction::Delete(id) => delete_artifact(&client, &scope, &id).await,
                BoardAction::Link(id, request) => link_artifact(&client, &scope, &id, request).await,
            }
        }
    });

    let project_ref = move || {
        let scope = scope.peek().clone();
        let name = match &*details.peek() {
            Some(Ok(project)) => project.name.clone(),
            _ => scope.project.clone(),
        };
        ProjectRef {
            id: scope.project,
            org_id: scope.org,
            name,
        }
    };

    let open_create = move |state: ArtifactState| {
        let on_submit = Handler::new(move |request| actions.send(BoardAction::Create(request)));
        let mut props = CreateArtifactProps::new(project_ref(), on_submit);
        props.initial_state = state;
        modal_api().open_create_artifact(props, None);
    };

    let open_edit = move |artifact: Artifact| {
        let id = artifact.id.clone();
        let on_submit = Handler::new(move |update| actions.send(BoardAction::Update(id.clone(), update)));
        modal_api().open_edit_task(EditTaskProps::new(artifact, on_submit), None);
    };

    let open_link = move |artifact: Artifact| {
        let candidates = match &*artifacts.peek() {
            Some(Ok(list)) => list.iter().map(ArtifactRef::from).collect(),
            _ => Vec::new(),
        };
        let id = artifact.id.clone();
        let on_create_link =
            Handler::new(move |request| actions.send(BoardAction::Link(id.clone(), request)));
        modal_api().open_link_artifact(
            LinkArtifactProps::new(ArtifactRef::from(&artifact), candidates, on_create_link),
            None,
        );
    };

    let open_delete = move |artifact: Artifact| {
        let id = artifact.id.clone();
        let on_confirm = Handler::new(move |_: ()| actions.send(BoardAction::Delete(id.clone())));
        modal_api().open_delete_artifact(
            DeleteArtifactProps::new(ArtifactRef::from(&artifact), on_confirm),
            None,
        );
    };

    let open_advance = move |artifact: Artifact| {
        let Some(next) = artifact.state.next() else {
            return;
        };
        let id = artifact.id.clone();
        let on_confirm =
            Handler::new(move |_: ()| actions.send(BoardAction::Advance(id.clone(), next)));
        let mut props = ConfirmProps::new(
            format!("Move \"{}\" to {}?", artifact.title, next.label()),
            on_confirm,
        );
        props.confirm_label = format!("Move to {}", next.label());
        modal_api().open_confirm(props, Some("Change state".to_string()));
    };

    let title = match &*details.read() {
        Some(Ok(project)) => format!("{} · {}", project.key, project.name),
        _ => "Board".to_string(),
    };

    rsx! {
        div { class: "h-full flex flex-col p-6 gap-4",
            div {
                Link { class: "text-sm text-gray-400 hover:text-white", to: Route::Projects { org: org.clone() }, "← Projects" }
                h1 { class: "text-2xl font-bold text-white mt-1", "{title}" }
            }
            match &*artifacts.read() {
                None => rsx! { Loading {} },
                Some(Err(e)) => rsx! { LoadFailed { message: e.user_message() } },
                Some(Ok(list)) => rsx! {
                    div { class: "flex-1 grid grid-cols-5 gap-4 min-h-0",
                        for state in ArtifactState::ALL {
                            Column {
                                key: "{state.as_str()}",
                                state,
                                artifacts: list.iter().filter(|a| a.state == state).cloned().collect::<Vec<_>>(),
                                on_create: open_create,
                                on_edit: open_edit,
                                on_link: open_link,
                                on_delete: open_delete,
                                on_advance: open_advance,
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn Column(
    state: ArtifactState,
    artifacts: Vec<Artifact>,
    on_create: EventHandler<ArtifactState>,
    on_edit: EventHandler<Artifact>,
    on_link: EventHandler<Artifact>,
    on_delete: EventHandler<Artifact>,
    on_advance: EventHandler<Artifact>,
) -> Element {
    let count = artifacts.len();

    rsx! {
        section { class: "flex flex-col rounded-xl bg-[#2b2d31] min-h-0",
            header { class: "flex items-center justify-between px-4 py-3 border-b border-[#1f2023]",
                h2 { class: "text-sm font-semibold text-gray-200",
                    "{state.label()} "
                    span { class: "text-gray-500", "{count}" }
                }
                button {
                    r#type: "button",
                    class: "text-gray-400 hover:text-white text-lg leading-none",
                    title: "New artifact in {state.label()}",
                    onclick: move |_| on_create.call(state),
                    "+"
                }
            }
            div { class: "flex-1 overflow-y-auto p-3 space-y-2",
                for artifact in artifacts {
                    ArtifactCard {
                        key: "{artifact.id}",
                        artifact,
                        on_edit,
                        on_link,
                        on_delete,
                        on_advance,
                    }
                }
            }
        }
    }
}

#[component]
fn ArtifactCard(
    artifact: Artifact,
    on_edit: EventHandler<Artifact>,
    on_link: EventHandler<Artifact>,
    on_delete: EventHandler<Artifact>,
    on_advance: EventHandler<Artifact>,
) -> Element {
    let next = artifact.state.next();
    let updated = artifact.updated_at.format("%b %d").to_string();
    let (edit, link, delete, advance) = (
        artifact.clone(),
        artifact.clone(),
        artifact.clone(),
        artifact.clone(),
    );

    rsx! {
        article { class: "rounded-lg bg-[#1e1f22] border border-[#2d2f34] p-3 space-y-2",
            div { class: "flex items-center justify-between gap-2",
                span { class: "text-[10px] uppercase tracking-wide text-indigo-300", "{artifact.kind.label()}" }
                span { class: "text-[10px] text-gray-500", "{updated}" }
            }
            button {
                r#type: "button",
                class: "block w-full text-left text-sm text-gray-100 hover:text-white",
                onclick: move |_| on_edit.call(edit.clone()),
                "{artifact.title}"
            }
            div { class: "flex gap-1 justify-end",
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Ghost),
                    onclick: move |_| on_link.call(link.clone()),
                    "Link"
                }
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Ghost),
                    onclick: move |_| on_delete.call(delete.clone()),
                    "Delete"
                }
                if let Some(next) = next {
                    button {
                        r#type: "button",
                        class: button_class(ButtonVariant::Secondary),
                        title: "Move to {next.label()}",
                        onclick: move |_| on_advance.call(advance.clone()),
                        "→"
                    }
                }
            }
        }
    }
}

async fn create_artifact(client: &ApiClient, scope: &BoardScope, request: CreateArtifactRequest) {
    update_modal_props(CreateArtifactPatch {
        submitting: Some(true),
        error: Some(None),
        ..Default::default()
    });
    match client
        .create_artifact(&scope.org, &scope.project, &request)
        .await
    {
        Ok(artifact) => {
            update_modal_props(CreateArtifactPatch {
                submitting: Some(false),
                ..Default::default()
            });
            close_if_open(ModalId::CreateArtifact);
            invalidate_prefix(&scope.project_key());
            notify(format!("Created \"{}\"", artifact.title), Severity::Success);
        }
        Err(e) => {
            crate::log_warn!("create artifact failed: {}", e);
            update_modal_props(CreateArtifactPatch {
                submitting: Some(false),
                error: Some(Some(e.user_message())),
                ..Default::default()
            });
        }
    }
}

async fn update_artifact(client: &ApiClient, scope: &BoardScope, id: &str, update: ArtifactUpdate) {
    update_modal_props(EditTaskPatch {
        submitting: Some(true),
        error: Some(None),
        ..Default::default()
    });
    match client
        .update_artifact(&scope.org, &scope.project, id, &update)
        .await
    {
        Ok(_) => {
            update_modal_props(EditTaskPatch {
                submitting: Some(false),
                ..Default::default()
            });
            close_if_open(ModalId::EditTask);
            invalidate_prefix(&scope.project_key());
            notify("Changes saved", Severity::Success);
        }
        Err(e) => {
            crate::log_warn!("update artifact {} failed: {}", id, e);
            update_modal_props(EditTaskPatch {
                submitting: Some(false),
                error: Some(Some(e.user_message())),
                ..Default::default()
            });
        }
    }
}

/// The server broadcasts the state change, so success needs no toast here.
async fn advance_artifact(client: &ApiClient, scope: &BoardScope, id: &str, next: ArtifactState) {
    let update = ArtifactUpdate {
        state: Some(next),
        ..Default::default()
    };
    match client
        .update_artifact(&scope.org, &scope.project, id, &update)
        .await
    {
        Ok(_) => invalidate_prefix(&scope.project_key()),
        Err(e) => {
            crate::log_warn!("moving artifact {} failed: {}", id, e);
            notify(e.user_message(), Severity::Error);
        }
    }
}

async fn delete_artifact(client: &ApiClient, scope: &BoardScope, id: &str) {
    match client.delete_artifact(&scope.org, &scope.project, id).await {
        Ok(()) => {
            invalidate_prefix(&scope.project_key());
            notify("Artifact deleted", Severity::Success);
        }
        Err(e) => {
            crate::log_warn!("delete artifact {} failed: {}", id, e);
            notify(e.user_message(), Severity::Error);
        }
    }
}

async fn link_artifact(client: &ApiClient, scope: &BoardScope, id: &str, request: CreateLinkRequest) {
    update_modal_props(LinkArtifactPatch {
        error: Some(None),
        ..Default::default()
    });
    match client
        .create_link(&scope.org, &scope.project, id, &request)
        .await
    {
        Ok(()) => {
            close_if_open(ModalId::LinkArtifact);
            invalidate_prefix(&scope.project_key());
            notify(
                format!("Linked as \"{}\"", request.kind.label()),
                Severity::Success,
            );
        }
        Err(e) => {
            crate::log_warn!("link from {} failed: {}", id, e);
            update_modal_props(LinkArtifactPatch {
                error: Some(Some(e.user_message())),
                ..Default::default()
            });
        }
    }
}
