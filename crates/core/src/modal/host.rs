use super::guard::NavigationTracker;
use super::id::ModalId;
use super::store::OpenModal;

/// What the mount point renders.
#[derive(Debug, Clone, PartialEq)]
pub struct HostFrame {
    pub session: OpenModal,
    /// False for a kept body whose session already closed.
    pub visible: bool,
}

/// Mount-point state: the last route seen and the body kept mounted after
/// its session closed.
///
/// A kept body belongs to the page it was opened on. A route change drops
/// it along with the open session, so no draft outlives the page.
#[derive(Debug, Default)]
pub struct ModalHost {
    navigation: NavigationTracker,
    retained: Option<OpenModal>,
    epoch: u64,
}

impl ModalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `location`. On a route change the kept body is dropped, the
    /// epoch advances and true is returned; the caller closes the open
    /// session.
    pub fn navigate(&mut self, location: &str) -> bool {
        if !self.navigation.observe(location) {
            return false;
        }
        if let Some(kept) = self.retained.take() {
            tracing::debug!(modal = %kept.id(), seq = kept.seq, "dropping kept modal body");
        }
        self.epoch += 1;
        true
    }

    /// Advances on every route change. Kept bodies are keyed by it so a
    /// page never inherits another page's body.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn retained(&self) -> Option<&OpenModal> {
        self.retained.as_ref()
    }

    /// Pick what to render for the slot's current session. `keep_mounted`
    /// tells which kinds stay mounted after they close.
    pub fn frame(
        &mut self,
        open: Option<&OpenModal>,
        keep_mounted: impl Fn(ModalId) -> bool,
    ) -> Option<HostFrame> {
        match open {
            Some(open) => {
                self.retained = keep_mounted(open.id()).then(|| open.clone());
                Some(HostFrame {
                    session: open.clone(),
                    visible: true,
                })
            }
            None => self.retained.clone().map(|session| HostFrame {
                session,
                visible: false,
            }),
        }
    }

    /// The mount point is going away: forget the kept body and the route
    /// baseline.
    pub fn detach(&mut self) {
        self.retained = None;
        self.navigation = NavigationTracker::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::{ConfirmProps, CreateArtifactProps, ModalProps, ModalStore, OpenOptions};
    use crate::Handler;
    use alm_shared::ProjectRef;

    fn keep_forms(id: ModalId) -> bool {
        id == ModalId::CreateArtifact
    }

    fn create_artifact(project: &str) -> ModalProps {
        CreateArtifactProps::new(
            ProjectRef {
                org_id: "acme".to_string(),
                id: project.to_string(),
                name: project.to_string(),
            },
            Handler::new(|_| {}),
        )
        .into()
    }

    #[test]
    fn kept_kind_stays_mounted_hidden_after_close() {
        let mut store = ModalStore::new();
        let mut host = ModalHost::new();
        host.navigate("/orgs/acme/projects/A");

        store.open(create_artifact("A"), OpenOptions::default());
        let shown = host.frame(store.current(), keep_forms).unwrap();
        assert!(shown.visible);

        store.close();
        let hidden = host.frame(store.current(), keep_forms).unwrap();
        assert!(!hidden.visible);
        assert_eq!(hidden.session.seq, shown.session.seq);
    }

    #[test]
    fn other_kinds_unmount_on_close() {
        let mut store = ModalStore::new();
        let mut host = ModalHost::new();
        store.open(create_artifact("A"), OpenOptions::default());
        host.frame(store.current(), keep_forms);

        store.open(
            ConfirmProps::new("Sure?".to_string(), Handler::new(|_| {})).into(),
            OpenOptions::default(),
        );
        assert!(host.frame(store.current(), keep_forms).unwrap().visible);
        store.close();
        assert_eq!(host.frame(store.current(), keep_forms), None);
    }

    #[test]
    fn route_change_drops_the_kept_body() {
        let mut store = ModalStore::new();
        let mut host = ModalHost::new();
        host.navigate("/orgs/acme/projects/A");
        store.open(create_artifact("A"), OpenOptions::default());
        host.frame(store.current(), keep_forms);
        store.close();
        assert!(host.retained().is_some());
        let epoch = host.epoch();

        assert!(host.navigate("/orgs/acme/projects/B"));
        assert!(host.retained().is_none());
        assert_eq!(host.frame(store.current(), keep_forms), None);
        assert!(host.epoch() > epoch);
    }

    #[test]
    fn same_route_keeps_the_body_and_epoch() {
        let mut host = ModalHost::new();
        let mut store = ModalStore::new();
        host.navigate("/orgs/acme/projects/A");
        store.open(create_artifact("A"), OpenOptions::default());
        host.frame(store.current(), keep_forms);
        store.close();

        let epoch = host.epoch();
        assert!(!host.navigate("/orgs/acme/projects/A"));
        assert!(host.retained().is_some());
        assert_eq!(host.epoch(), epoch);
    }

    #[test]
    fn detach_forgets_body_and_baseline() {
        let mut store = ModalStore::new();
        let mut host = ModalHost::new();
        host.navigate("/orgs/acme/projects/A");
        store.open(create_artifact("A"), OpenOptions::default());
        host.frame(store.current(), keep_forms);

        host.detach();
        assert!(host.retained().is_none());
        assert!(!host.navigate("/login"));
    }
}
