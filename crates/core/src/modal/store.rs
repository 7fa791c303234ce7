use super::{ModalId, ModalPatch, ModalProps};
use crate::handler::Handler;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenOptions {
    /// Replaces the descriptor's default title.
    pub title: Option<String>,
}

impl OpenOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenModal {
    /// Increases with every `open`; bodies are keyed by it so each session
    /// mounts fresh.
    pub seq: u64,
    /// Bumped by every applied props update within the session.
    pub revision: u64,
    pub props: ModalProps,
    pub title_override: Option<String>,
}

impl OpenModal {
    pub fn id(&self) -> ModalId {
        self.props.id()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalSession {
    #[default]
    Closed,
    Open(OpenModal),
}

/// First half of a close: which session is ending and the hook to run
/// before it is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingClose {
    pub seq: u64,
    pub hook: Option<Handler>,
}

/// The single modal slot.
#[derive(Debug, Default)]
pub struct ModalStore {
    session: ModalSession,
    next_seq: u64,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &ModalSession {
        &self.session
    }

    pub fn current(&self) -> Option<&OpenModal> {
        match &self.session {
            ModalSession::Open(open) => Some(open),
            ModalSession::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current().is_some()
    }

    /// Replace whatever is open with a new session. Returns its sequence
    /// number.
    pub fn open(&mut self, props: ModalProps, options: OpenOptions) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        if let Some(previous) = self.current() {
            tracing::debug!(replaced = %previous.id(), modal = %props.id(), seq, "modal replaced");
        } else {
            tracing::debug!(modal = %props.id(), seq, "modal opened");
        }
        self.session = ModalSession::Open(OpenModal {
            seq,
            revision: 0,
            props,
            title_override: options.title,
        });
        seq
    }

    /// Run the close hook (if any) and return to `Closed`. No-op when
    /// nothing is open. Returns whether a session was closed.
    pub fn close(&mut self) -> bool {
        let Some(pending) = self.begin_close() else {
            return false;
        };
        if let Some(hook) = &pending.hook {
            hook.call(());
        }
        self.finish_close(pending.seq)
    }

    /// Split form of [`close`](Self::close) for callers whose hook may
    /// re-enter the store: run `hook` between the two halves.
    pub fn begin_close(&self) -> Option<PendingClose> {
        self.current().map(|open| PendingClose {
            seq: open.seq,
            hook: open.props.on_close_complete().cloned(),
        })
    }

    /// Clear the session `seq` if it is still the open one. A session opened
    /// by the close hook itself survives.
    pub fn finish_close(&mut self, seq: u64) -> bool {
        match &self.session {
            ModalSession::Open(open) if open.seq == seq => {
                tracing::debug!(modal = %open.id(), seq, "modal closed");
                self.session = ModalSession::Closed;
                true
            }
            _ => false,
        }
    }

    /// Shallow-merge `patch` into the open session's props. No-op when
    /// closed or when the patch targets another modal kind.
    pub fn update_props(&mut self, patch: ModalPatch) -> bool {
        let ModalSession::Open(open) = &mut self.session else {
            return false;
        };
        match open.props.merge(patch) {
            Ok(()) => {
                open.revision += 1;
                true
            }
            Err(patch) => {
                tracing::warn!(
                    open = %open.id(),
                    patch = %patch.id(),
                    "ignoring props update for a modal that is not open"
                );
                false
            }
        }
    }

    /// Navigation always wins over an open modal.
    pub fn on_navigate(&mut self) -> bool {
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::{
        ConfirmPatch, ConfirmProps, DeleteArtifactProps, EditTaskPatch, InviteMemberPatch,
        InviteMemberProps,
    };
    use alm_shared::ArtifactRef;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn confirm(message: &str) -> ModalProps {
        ConfirmProps::new(message.to_string(), Handler::new(|_| {})).into()
    }

    fn delete(id: &str) -> ModalProps {
        DeleteArtifactProps::new(
            ArtifactRef {
                id: id.to_string(),
                title: "Login bug".to_string(),
            },
            Handler::new(|_| {}),
        )
        .into()
    }

    #[test]
    fn open_replaces_instead_of_stacking() {
        let mut store = ModalStore::new();
        store.open(confirm("first"), OpenOptions::default());
        let seq = store.open(delete("A1"), OpenOptions::titled("Really?"));

        let open = store.current().unwrap();
        assert_eq!(open.id(), ModalId::DeleteArtifact);
        let ModalProps::DeleteArtifact(props) = &open.props else {
            panic!("expected delete modal");
        };
        assert_eq!(props.artifact.id, "A1");
        assert_eq!(open.title_override.as_deref(), Some("Really?"));
        assert_eq!(open.seq, seq);

        assert!(store.close());
        assert_eq!(store.session(), &ModalSession::Closed);
    }

    #[test]
    fn close_when_closed_is_a_noop() {
        let mut store = ModalStore::new();
        assert!(!store.close());
        assert!(!store.close());
        assert_eq!(store.session(), &ModalSession::Closed);
    }

    #[test]
    fn close_hook_runs_once_before_clearing() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let props = ConfirmProps::new("Archive?".to_string(), Handler::new(|_| {}))
            .with_close_complete(Handler::new(move |_| counter.set(counter.get() + 1)));

        let mut store = ModalStore::new();
        store.open(props.into(), OpenOptions::default());
        store.close();
        store.close();

        assert_eq!(calls.get(), 1);
        assert!(!store.is_open());
    }

    #[test]
    fn split_close_keeps_a_session_opened_by_the_hook() {
        let store = Rc::new(RefCell::new(ModalStore::new()));
        let reopen = store.clone();
        let props = ConfirmProps::new("first".to_string(), Handler::new(|_| {}))
            .with_close_complete(Handler::new(move |_| {
                reopen
                    .borrow_mut()
                    .open(confirm("second"), OpenOptions::default());
            }));
        store.borrow_mut().open(props.into(), OpenOptions::default());

        let pending = store.borrow().begin_close().unwrap();
        if let Some(hook) = &pending.hook {
            hook.call(());
        }
        assert!(!store.borrow_mut().finish_close(pending.seq));

        let store = store.borrow();
        let ModalProps::Confirm(open) = &store.current().unwrap().props else {
            panic!("expected confirm modal");
        };
        assert_eq!(open.message, "second");
    }

    #[test]
    fn update_props_merges_shallowly() {
        let mut store = ModalStore::new();
        let props = InviteMemberProps::new("acme".to_string(), Handler::new(|_| {}));
        store.open(props.into(), OpenOptions::titled("Invite"));

        assert!(store.update_props(
            InviteMemberPatch {
                error: Some(Some("Unknown email".to_string())),
                ..Default::default()
            }
            .into()
        ));

        let open = store.current().unwrap();
        assert_eq!(open.title_override.as_deref(), Some("Invite"));
        let ModalProps::InviteMember(props) = &open.props else {
            panic!("expected invite modal");
        };
        assert_eq!(props.org_id, "acme");
        assert_eq!(props.error.as_deref(), Some("Unknown email"));
        assert_eq!(open.revision, 1);
    }

    #[test]
    fn update_props_is_ignored_when_closed_or_mismatched() {
        let mut store = ModalStore::new();
        assert!(!store.update_props(ConfirmPatch::default().into()));
        assert_eq!(store.session(), &ModalSession::Closed);

        store.open(confirm("keep"), OpenOptions::default());
        let before = store.session().clone();
        assert!(!store.update_props(EditTaskPatch::default().into()));
        assert_eq!(store.session(), &before);
        assert_eq!(store.current().unwrap().revision, 0);
    }

    #[test]
    fn a_new_session_starts_at_revision_zero() {
        let mut store = ModalStore::new();
        store.open(confirm("one"), OpenOptions::default());
        store.update_props(ConfirmPatch::default().into());
        store.update_props(ConfirmPatch::default().into());
        assert_eq!(store.current().unwrap().revision, 2);

        store.open(confirm("two"), OpenOptions::default());
        assert_eq!(store.current().unwrap().revision, 0);
    }

    #[test]
    fn navigation_closes_any_modal() {
        for props in [confirm("x"), delete("A1")] {
            let mut store = ModalStore::new();
            store.open(props, OpenOptions::default());
            assert!(store.on_navigate());
            assert!(!store.is_open());
        }
    }

    proptest! {
        #[test]
        fn last_open_wins_and_close_empties(messages in proptest::collection::vec("[a-z]{1,8}", 1..10)) {
            let mut store = ModalStore::new();
            let mut last_seq = 0;
            for message in &messages {
                let seq = store.open(confirm(message), OpenOptions::default());
                prop_assert!(seq > last_seq);
                last_seq = seq;
            }
            let open = store.current().unwrap();
            prop_assert_eq!(open.seq, last_seq);
            let ModalProps::Confirm(props) = &open.props else {
                panic!("expected confirm modal");
            };
            prop_assert_eq!(&props.message, messages.last().unwrap());
            prop_assert!(store.close());
            prop_assert!(!store.is_open());
        }
    }
}
