//! Hierarchical query keys and the invalidation interface of the client-side
//! data cache.
//!
//! Keys are ordered segment tuples rooted at the tenant, e.g.
//! `orgs/{org}/projects/{project}/artifacts`. Invalidation is by pattern,
//! never by exact key, so every cached view under a project refreshes
//! together.

mod cache;

use std::fmt;

pub use cache::QueryCacheState;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn orgs() -> Self {
        Self::new(["orgs"])
    }

    pub fn org_projects(org_id: &str) -> Self {
        Self::new(["orgs", org_id, "projects"])
    }

    pub fn project(org_id: &str, project_id: &str) -> Self {
        Self::new(["orgs", org_id, "projects", project_id])
    }

    pub fn project_artifacts(org_id: &str, project_id: &str) -> Self {
        Self::new(["orgs", org_id, "projects", project_id, "artifacts"])
    }

    pub fn project_members(org_id: &str, project_id: &str) -> Self {
        Self::new(["orgs", org_id, "projects", project_id, "members"])
    }

    /// The `{org}` of an `orgs/{org}/...` key.
    pub fn org_id(&self) -> Option<&str> {
        match self.0.as_slice() {
            [root, org, ..] if root == "orgs" => Some(org.as_str()),
            _ => None,
        }
    }

    /// The `{project}` of an `orgs/{org}/projects/{project}/...` key.
    pub fn project_id(&self) -> Option<&str> {
        match self.0.as_slice() {
            [root, _, projects, project, ..] if root == "orgs" && projects == "projects" => {
                Some(project.as_str())
            }
            _ => None,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Exact(String),
    Any,
}

/// Prefix pattern over key segments. A key matches when it is at least as
/// long as the pattern and every pattern segment accepts the key segment at
/// the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKeyMatcher {
    pattern: Vec<Segment>,
}

impl QueryKeyMatcher {
    pub fn new(pattern: Vec<Segment>) -> Self {
        Self { pattern }
    }

    /// Everything at or below `key`.
    pub fn prefix(key: &QueryKey) -> Self {
        Self::new(key.segments().iter().cloned().map(Segment::Exact).collect())
    }

    /// Every key rooted at a project, whichever org it sits under:
    /// `orgs/*/projects/{project_id}/...`.
    pub fn project(project_id: &str) -> Self {
        Self::new(vec![
            Segment::Exact("orgs".to_string()),
            Segment::Any,
            Segment::Exact("projects".to_string()),
            Segment::Exact(project_id.to_string()),
        ])
    }

    pub fn matches(&self, key: &QueryKey) -> bool {
        let segments = key.segments();
        segments.len() >= self.pattern.len()
            && self
                .pattern
                .iter()
                .zip(segments)
                .all(|(pattern, segment)| match pattern {
                    Segment::Any => true,
                    Segment::Exact(expected) => expected == segment,
                })
    }
}

/// Narrow interface to the shared data cache. Invalidation is idempotent
/// and fire-and-forget.
pub trait QueryCache {
    fn invalidate(&self, matcher: &QueryKeyMatcher);
}

impl QueryCache for std::cell::RefCell<QueryCacheState> {
    fn invalidate(&self, matcher: &QueryKeyMatcher) {
        self.borrow_mut().invalidate(matcher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_matcher_hits_every_view_of_the_project() {
        let matcher = QueryKeyMatcher::project("P1");
        assert!(matcher.matches(&QueryKey::project("acme", "P1")));
        assert!(matcher.matches(&QueryKey::project_artifacts("acme", "P1")));
        assert!(matcher.matches(&QueryKey::project_members("globex", "P1")));

        assert!(!matcher.matches(&QueryKey::project_artifacts("acme", "P2")));
        assert!(!matcher.matches(&QueryKey::org_projects("acme")));
        assert!(!matcher.matches(&QueryKey::new(["users", "acme", "projects", "P1"])));
    }

    #[test]
    fn ids_come_back_out_of_keys() {
        let key = QueryKey::project_artifacts("acme", "P1");
        assert_eq!(key.org_id(), Some("acme"));
        assert_eq!(key.project_id(), Some("P1"));

        assert_eq!(QueryKey::org_projects("acme").project_id(), None);
        assert_eq!(QueryKey::orgs().org_id(), None);
        assert_eq!(QueryKey::new(["users", "u1"]).org_id(), None);
    }

    #[test]
    fn prefix_matcher_is_hierarchical() {
        let matcher = QueryKeyMatcher::prefix(&QueryKey::org_projects("acme"));
        assert!(matcher.matches(&QueryKey::org_projects("acme")));
        assert!(matcher.matches(&QueryKey::project_members("acme", "P9")));
        assert!(!matcher.matches(&QueryKey::orgs()));
    }

    #[test]
    fn keys_display_as_paths() {
        assert_eq!(
            QueryKey::project_artifacts("acme", "P1").to_string(),
            "orgs/acme/projects/P1/artifacts"
        );
    }
}
