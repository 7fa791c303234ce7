//! Typed payloads, one per modal kind.
//!
//! Every props struct carries an optional `on_close_complete` hook that the
//! store runs when the session ends, and a generated `*Patch` companion used
//! by `update_props`: `Some` fields replace the current value, `None` fields
//! leave it alone.

use alm_shared::{
    Artifact, ArtifactRef, ArtifactState, ArtifactUpdate, CreateArtifactRequest,
    CreateLinkRequest, CreateProjectRequest, InviteMemberRequest, ProjectMember, ProjectRef, Role,
};

use super::ModalId;
use crate::handler::Handler;

macro_rules! modal_props {
    (
        $(#[$meta:meta])*
        $name:ident, $patch:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
        $( defaults {
            $( $(#[$dmeta:meta])* $dfield:ident : $dty:ty = $dval:expr ),* $(,)?
        } )?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
            $($( $(#[$dmeta])* pub $dfield: $dty, )*)?
            pub on_close_complete: Option<Handler>,
        }

        #[doc = concat!("Shallow patch for [`", stringify!($name), "`].")]
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $patch {
            $( pub $field: Option<$ty>, )*
            $($( pub $dfield: Option<$dty>, )*)?
            pub on_close_complete: Option<Option<Handler>>,
        }

        impl $name {
            #[allow(clippy::new_without_default, clippy::too_many_arguments)]
            pub fn new($( $field: $ty ),*) -> Self {
                Self {
                    $( $field, )*
                    $($( $dfield: $dval, )*)?
                    on_close_complete: None,
                }
            }

            pub fn with_close_complete(mut self, handler: Handler) -> Self {
                self.on_close_complete = Some(handler);
                self
            }

            pub fn merge(&mut self, patch: $patch) {
                $( if let Some(value) = patch.$field { self.$field = value; } )*
                $($( if let Some(value) = patch.$dfield { self.$dfield = value; } )*)?
                if let Some(value) = patch.on_close_complete {
                    self.on_close_complete = value;
                }
            }
        }
    };
}

modal_props! {
    /// Confirmation before permanently deleting an artifact.
    DeleteArtifactProps, DeleteArtifactPatch {
        artifact: ArtifactRef,
        on_confirm: Handler,
    }
    defaults {
        on_cancel: Option<Handler> = None,
    }
}

modal_props! {
    /// Edit form for a single task.
    EditTaskProps, EditTaskPatch {
        task: Artifact,
        on_submit: Handler<ArtifactUpdate>,
    }
    defaults {
        /// Failure message pushed back by the screen after a rejected save.
        error: Option<String> = None,
        submitting: bool = false,
    }
}

modal_props! {
    /// Member list of a project with role changes and removal.
    ProjectMembersProps, ProjectMembersPatch {
        project: ProjectRef,
        members: Vec<ProjectMember>,
        on_change_role: Handler<(String, Role)>,
        on_remove: Handler<String>,
    }
    defaults {
        error: Option<String> = None,
    }
}

modal_props! {
    CreateProjectProps, CreateProjectPatch {
        org_id: String,
        on_submit: Handler<CreateProjectRequest>,
    }
    defaults {
        error: Option<String> = None,
        submitting: bool = false,
    }
}

modal_props! {
    CreateArtifactProps, CreateArtifactPatch {
        project: ProjectRef,
        on_submit: Handler<CreateArtifactRequest>,
    }
    defaults {
        /// Column the new artifact lands in.
        initial_state: ArtifactState = ArtifactState::Backlog,
        error: Option<String> = None,
        submitting: bool = false,
    }
}

modal_props! {
    /// Pick another artifact and a relation to link it with.
    LinkArtifactProps, LinkArtifactPatch {
        artifact: ArtifactRef,
        candidates: Vec<ArtifactRef>,
        on_create_link: Handler<CreateLinkRequest>,
    }
    defaults {
        error: Option<String> = None,
    }
}

modal_props! {
    InviteMemberProps, InviteMemberPatch {
        org_id: String,
        on_invite: Handler<InviteMemberRequest>,
    }
    defaults {
        error: Option<String> = None,
        submitting: bool = false,
    }
}

modal_props! {
    /// Generic yes/no confirmation.
    ConfirmProps, ConfirmPatch {
        message: String,
        on_confirm: Handler,
    }
    defaults {
        confirm_label: String = "Confirm".to_string(),
        destructive: bool = false,
        on_cancel: Option<Handler> = None,
    }
}

macro_rules! modal_kinds {
    ($( $variant:ident($props:ident, $patch:ident) ),* $(,)?) => {
        /// Payload of the open modal; the variant determines the [`ModalId`].
        #[derive(Clone, Debug, PartialEq)]
        pub enum ModalProps {
            $( $variant($props), )*
        }

        /// Partial update addressed to one modal kind.
        #[derive(Clone, Debug, PartialEq)]
        pub enum ModalPatch {
            $( $variant($patch), )*
        }

        impl ModalProps {
            pub fn id(&self) -> ModalId {
                match self {
                    $( ModalProps::$variant(_) => ModalId::$variant, )*
                }
            }

            pub fn on_close_complete(&self) -> Option<&Handler> {
                match self {
                    $( ModalProps::$variant(props) => props.on_close_complete.as_ref(), )*
                }
            }

            /// Merge `patch` in place. A patch for a different modal kind is
            /// handed back untouched.
            pub fn merge(&mut self, patch: ModalPatch) -> Result<(), ModalPatch> {
                match (self, patch) {
                    $( (ModalProps::$variant(props), ModalPatch::$variant(patch)) => {
                        props.merge(patch);
                        Ok(())
                    } )*
                    #[allow(unreachable_patterns)]
                    (_, patch) => Err(patch),
                }
            }
        }

        impl ModalPatch {
            pub fn id(&self) -> ModalId {
                match self {
                    $( ModalPatch::$variant(_) => ModalId::$variant, )*
                }
            }
        }

        $(
            impl From<$props> for ModalProps {
                fn from(props: $props) -> Self {
                    ModalProps::$variant(props)
                }
            }

            impl From<$patch> for ModalPatch {
                fn from(patch: $patch) -> Self {
                    ModalPatch::$variant(patch)
                }
            }
        )*
    };
}

impl ModalProps {
    /// Callback for the dismiss path (close button, escape, cancel), for the
    /// kinds that have one.
    pub fn on_cancel(&self) -> Option<&Handler> {
        match self {
            ModalProps::DeleteArtifact(props) => props.on_cancel.as_ref(),
            ModalProps::Confirm(props) => props.on_cancel.as_ref(),
            _ => None,
        }
    }
}

modal_kinds! {
    DeleteArtifact(DeleteArtifactProps, DeleteArtifactPatch),
    EditTask(EditTaskProps, EditTaskPatch),
    ProjectMembers(ProjectMembersProps, ProjectMembersPatch),
    CreateProject(CreateProjectProps, CreateProjectPatch),
    CreateArtifact(CreateArtifactProps, CreateArtifactPatch),
    LinkArtifact(LinkArtifactProps, LinkArtifactPatch),
    InviteMember(InviteMemberProps, InviteMemberPatch),
    Confirm(ConfirmProps, ConfirmPatch),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite() -> InviteMemberProps {
        InviteMemberProps::new("acme".to_string(), Handler::new(|_| {}))
    }

    #[test]
    fn patch_replaces_only_given_fields() {
        let mut props = invite();
        props.merge(InviteMemberPatch {
            error: Some(Some("Email already invited".to_string())),
            ..Default::default()
        });
        assert_eq!(props.org_id, "acme");
        assert_eq!(props.error.as_deref(), Some("Email already invited"));
        assert!(!props.submitting);

        props.merge(InviteMemberPatch {
            submitting: Some(true),
            ..Default::default()
        });
        assert_eq!(props.error.as_deref(), Some("Email already invited"));
        assert!(props.submitting);
    }

    #[test]
    fn mismatched_patch_is_returned() {
        let mut props = ModalProps::from(invite());
        let patch = ModalPatch::from(ConfirmPatch {
            destructive: Some(true),
            ..Default::default()
        });
        assert_eq!(props.merge(patch.clone()), Err(patch));
        assert_eq!(props.id(), ModalId::InviteMember);
    }

    #[test]
    fn only_confirmations_have_a_cancel_path() {
        let cancel = Handler::new(|_| {});
        let mut confirm = ConfirmProps::new("Leave?".to_string(), Handler::new(|_| {}));
        confirm.on_cancel = Some(cancel.clone());
        assert_eq!(ModalProps::from(confirm).on_cancel(), Some(&cancel));
        assert_eq!(ModalProps::from(invite()).on_cancel(), None);
    }

    #[test]
    fn defaults_are_filled_by_new() {
        let props = ConfirmProps::new("Archive project?".to_string(), Handler::new(|_| {}));
        assert_eq!(props.confirm_label, "Confirm");
        assert!(!props.destructive);
        assert!(props.on_cancel.is_none());
        assert!(props.on_close_complete.is_none());
    }
}
