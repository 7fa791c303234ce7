//! Shared data models for the ALM REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project keys prefix artifact numbers (`ALM-42`), so they stay short and shouty.
pub fn validate_project_key(key: &str) -> bool {
    (2..=10).contains(&key.len())
        && key.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

// --- Identity ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Owner, Role::Admin, Role::Member, Role::Viewer];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Admin => "Admin",
            Role::Member => "Member",
            Role::Viewer => "Viewer",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Viewer => "viewer",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == value)
    }

    /// Roles that can be handed out through an invitation.
    pub fn assignable() -> [Role; 3] {
        [Role::Admin, Role::Member, Role::Viewer]
    }
}

// --- Tenancy ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Org {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The slice of a project that modals and query keys need.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectRef {
    pub id: String,
    pub org_id: String,
    pub name: String,
}

impl From<&Project> for ProjectRef {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            org_id: project.org_id.clone(),
            name: project.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectMember {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

// --- Artifacts ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Task,
    Bug,
    Story,
    Epic,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Task,
        ArtifactKind::Bug,
        ArtifactKind::Story,
        ArtifactKind::Epic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Task => "Task",
            ArtifactKind::Bug => "Bug",
            ArtifactKind::Story => "Story",
            ArtifactKind::Epic => "Epic",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Task => "task",
            ArtifactKind::Bug => "bug",
            ArtifactKind::Story => "story",
            ArtifactKind::Epic => "epic",
        }
    }

    pub fn parse(value: &str) -> Option<ArtifactKind> {
        ArtifactKind::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

/// Workflow columns, in board order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactState {
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl ArtifactState {
    pub const ALL: [ArtifactState; 5] = [
        ArtifactState::Backlog,
        ArtifactState::Todo,
        ArtifactState::InProgress,
        ArtifactState::Review,
        ArtifactState::Done,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactState::Backlog => "Backlog",
            ArtifactState::Todo => "To Do",
            ArtifactState::InProgress => "In Progress",
            ArtifactState::Review => "Review",
            ArtifactState::Done => "Done",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactState::Backlog => "backlog",
            ArtifactState::Todo => "todo",
            ArtifactState::InProgress => "in_progress",
            ArtifactState::Review => "review",
            ArtifactState::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<ArtifactState> {
        ArtifactState::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// The next column to the right, if any.
    pub fn next(&self) -> Option<ArtifactState> {
        let idx = ArtifactState::ALL.iter().position(|s| s == self)?;
        ArtifactState::ALL.get(idx + 1).copied()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    pub id: String,
    pub project_id: String,
    pub kind: ArtifactKind,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: ArtifactState,
    #[serde(default)]
    pub assignee_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Identity and display title of an artifact, enough to confirm or link it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactRef {
    pub id: String,
    pub title: String,
}

impl From<&Artifact> for ArtifactRef {
    fn from(artifact: &Artifact) -> Self {
        Self {
            id: artifact.id.clone(),
            title: artifact.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Blocks,
    RelatesTo,
    Duplicates,
}

impl LinkKind {
    pub const ALL: [LinkKind; 3] = [LinkKind::Blocks, LinkKind::RelatesTo, LinkKind::Duplicates];

    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::Blocks => "blocks",
            LinkKind::RelatesTo => "relates to",
            LinkKind::Duplicates => "duplicates",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Blocks => "blocks",
            LinkKind::RelatesTo => "relates_to",
            LinkKind::Duplicates => "duplicates",
        }
    }

    pub fn parse(value: &str) -> Option<LinkKind> {
        LinkKind::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

// --- Requests ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProjectRequest {
    pub name: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateArtifactRequest {
    pub kind: ArtifactKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub state: ArtifactState,
}

/// Partial artifact update; absent fields are left unchanged server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtifactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ArtifactState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

impl ArtifactUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ArtifactUpdate::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateLinkRequest {
    pub target_id: String,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateMemberRoleRequest {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InviteMemberRequest {
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_keys_are_short_uppercase() {
        assert!(validate_project_key("ALM"));
        assert!(validate_project_key("WEB2"));
        assert!(!validate_project_key("alm"));
        assert!(!validate_project_key("2WEB"));
        assert!(!validate_project_key("A"));
        assert!(!validate_project_key("ABCDEFGHIJK"));
    }

    #[test]
    fn artifact_state_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&ArtifactState::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(ArtifactState::parse("in_progress"), Some(ArtifactState::InProgress));
        assert_eq!(ArtifactState::Review.next(), Some(ArtifactState::Done));
        assert_eq!(ArtifactState::Done.next(), None);
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let update = ArtifactUpdate::default();
        assert!(update.is_empty());
        assert_eq!(serde_json::to_string(&update).unwrap(), "{}");
    }
}
