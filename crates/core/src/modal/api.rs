use super::{
    ConfirmProps, CreateArtifactProps, CreateProjectProps, DeleteArtifactProps, EditTaskProps,
    InviteMemberProps, LinkArtifactProps, ModalProps, ModalStore, OpenOptions,
    ProjectMembersProps,
};

/// Anything that can hold the open modal.
pub trait ModalSink {
    fn open(&mut self, props: ModalProps, options: OpenOptions);
}

impl ModalSink for ModalStore {
    fn open(&mut self, props: ModalProps, options: OpenOptions) {
        ModalStore::open(self, props, options);
    }
}

impl<S: ModalSink + ?Sized> ModalSink for &mut S {
    fn open(&mut self, props: ModalProps, options: OpenOptions) {
        (**self).open(props, options);
    }
}

/// Typed entry points, one per modal kind. Each takes exactly the payload its
/// body needs, so a screen cannot hand a delete confirmation the props of an
/// edit form. `title` overrides the registry's default title.
pub struct ModalApi<S> {
    sink: S,
}

impl<S: ModalSink> ModalApi<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    fn open(&mut self, props: impl Into<ModalProps>, title: Option<String>) {
        self.sink.open(props.into(), OpenOptions { title });
    }

    pub fn open_delete_artifact(&mut self, props: DeleteArtifactProps, title: Option<String>) {
        self.open(props, title);
    }

    /// Titled after the task unless a title is given.
    pub fn open_edit_task(&mut self, props: EditTaskProps, title: Option<String>) {
        let title = title.or_else(|| Some(props.task.title.clone()));
        self.open(props, title);
    }

    /// Titled after the project unless a title is given.
    pub fn open_project_members(&mut self, props: ProjectMembersProps, title: Option<String>) {
        let title = title.or_else(|| Some(props.project.name.clone()));
        self.open(props, title);
    }

    pub fn open_create_project(&mut self, props: CreateProjectProps, title: Option<String>) {
        self.open(props, title);
    }

    pub fn open_create_artifact(&mut self, props: CreateArtifactProps, title: Option<String>) {
        self.open(props, title);
    }

    pub fn open_link_artifact(&mut self, props: LinkArtifactProps, title: Option<String>) {
        self.open(props, title);
    }

    pub fn open_invite_member(&mut self, props: InviteMemberProps, title: Option<String>) {
        self.open(props, title);
    }

    pub fn open_confirm(&mut self, props: ConfirmProps, title: Option<String>) {
        self.open(props, title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;
    use crate::modal::ModalId;
    use alm_shared::{Artifact, ArtifactKind, ArtifactState, ProjectRef};
    use chrono::Utc;

    fn task() -> Artifact {
        Artifact {
            id: "T7".to_string(),
            project_id: "P1".to_string(),
            kind: ArtifactKind::Task,
            title: "Wire up SSO".to_string(),
            description: None,
            state: ArtifactState::Todo,
            assignee_id: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn edit_task_is_titled_after_the_task() {
        let mut store = ModalStore::new();
        ModalApi::new(&mut store)
            .open_edit_task(EditTaskProps::new(task(), Handler::new(|_| {})), None);

        let open = store.current().unwrap();
        assert_eq!(open.id(), ModalId::EditTask);
        assert_eq!(open.title_override.as_deref(), Some("Wire up SSO"));
    }

    #[test]
    fn explicit_title_wins_over_synthesized_one() {
        let mut store = ModalStore::new();
        let project = ProjectRef {
            id: "P1".to_string(),
            org_id: "acme".to_string(),
            name: "Apollo".to_string(),
        };
        let props = ProjectMembersProps::new(
            project.clone(),
            Vec::new(),
            Handler::new(|_| {}),
            Handler::new(|_| {}),
        );

        let mut api = ModalApi::new(&mut store);
        api.open_project_members(props.clone(), None);
        assert_eq!(
            store.current().unwrap().title_override.as_deref(),
            Some("Apollo")
        );

        ModalApi::new(&mut store).open_project_members(props, Some("Team".to_string()));
        assert_eq!(store.current().unwrap().title_override.as_deref(), Some("Team"));
    }

    #[test]
    fn other_modals_keep_the_default_title() {
        let mut store = ModalStore::new();
        ModalApi::new(&mut store).open_confirm(
            ConfirmProps::new("Archive?".to_string(), Handler::new(|_| {})),
            None,
        );
        assert_eq!(store.current().unwrap().title_override, None);
    }
}
