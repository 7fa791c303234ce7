use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Closed set of modal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModalId {
    DeleteArtifact,
    EditTask,
    ProjectMembers,
    CreateProject,
    CreateArtifact,
    LinkArtifact,
    InviteMember,
    Confirm,
}

impl ModalId {
    pub const ALL: [ModalId; 8] = [
        ModalId::DeleteArtifact,
        ModalId::EditTask,
        ModalId::ProjectMembers,
        ModalId::CreateProject,
        ModalId::CreateArtifact,
        ModalId::LinkArtifact,
        ModalId::InviteMember,
        ModalId::Confirm,
    ];

    /// Position in [`ModalId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModalId::DeleteArtifact => "delete_artifact",
            ModalId::EditTask => "edit_task",
            ModalId::ProjectMembers => "project_members",
            ModalId::CreateProject => "create_project",
            ModalId::CreateArtifact => "create_artifact",
            ModalId::LinkArtifact => "link_artifact",
            ModalId::InviteMember => "invite_member",
            ModalId::Confirm => "confirm",
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalId {
    type Err = ModalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModalId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ModalError::UnknownModal(s.to_string()))
    }
}

/// Configuration errors. These are programming mistakes, surfaced once at
/// startup rather than handled at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("unknown modal identifier `{0}`")]
    UnknownModal(String),
    #[error("modal `{0}` is registered more than once")]
    DuplicateRegistration(ModalId),
    #[error("modal `{0}` has no registry entry")]
    Unregistered(ModalId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_follows_declaration_order() {
        for (idx, id) in ModalId::ALL.iter().enumerate() {
            assert_eq!(id.index(), idx);
        }
    }

    #[test]
    fn parses_known_names_only() {
        assert_eq!("edit_task".parse::<ModalId>(), Ok(ModalId::EditTask));
        assert_eq!(
            "EditTask".parse::<ModalId>(),
            Err(ModalError::UnknownModal("EditTask".to_string()))
        );
    }
}
