//! Screen → API → store → rendered body → confirm → closed, without a UI
//! runtime. Views are plain functions rendering the body to text.

use std::cell::Cell;
use std::rc::Rc;

use alm_core::modal::{
    standard_descriptors, DeleteArtifactProps, ModalApi, ModalHost, ModalId, ModalOutcome,
    ModalProps, ModalRegistry, ModalSession, ModalStore, TerminalGuard,
};
use alm_core::Handler;
use alm_shared::ArtifactRef;

type TextView = fn(&ModalProps) -> String;

fn delete_artifact_body(props: &ModalProps) -> String {
    match props {
        ModalProps::DeleteArtifact(props) => format!(
            "Delete \"{}\"? This cannot be undone.",
            props.artifact.title
        ),
        other => panic!("delete view got {:?}", other.id()),
    }
}

fn generic_body(props: &ModalProps) -> String {
    props.id().to_string()
}

fn registry() -> ModalRegistry<TextView> {
    ModalRegistry::new(standard_descriptors(|id| match id {
        ModalId::DeleteArtifact => delete_artifact_body as TextView,
        _ => generic_body as TextView,
    }))
    .expect("standard table covers every modal")
}

#[test]
fn delete_artifact_confirm_flow() {
    let registry = registry();
    let mut store = ModalStore::new();

    let confirmed = Rc::new(Cell::new(0));
    let closed = Rc::new(Cell::new(0));
    let on_confirm = {
        let confirmed = confirmed.clone();
        Handler::new(move |()| confirmed.set(confirmed.get() + 1))
    };
    let on_close_complete = {
        let closed = closed.clone();
        Handler::new(move |()| closed.set(closed.get() + 1))
    };

    ModalApi::new(&mut store).open_delete_artifact(
        DeleteArtifactProps::new(
            ArtifactRef {
                id: "A1".to_string(),
                title: "Login bug".to_string(),
            },
            on_confirm,
        )
        .with_close_complete(on_close_complete),
        None,
    );

    let open = store.current().expect("modal is open").clone();
    assert_eq!(open.id(), ModalId::DeleteArtifact);
    assert_eq!(registry.title_for(&open), "Delete artifact");

    let descriptor = registry.lookup(open.id());
    let body = (descriptor.view)(&open.props);
    assert!(body.contains("Login bug"), "body was {body:?}");

    // Confirm twice (double click): only the first reaches the screen.
    let guard = TerminalGuard::new();
    let ModalProps::DeleteArtifact(props) = &open.props else {
        unreachable!()
    };
    for _ in 0..2 {
        guard.settle(ModalOutcome::Confirmed, || props.on_confirm.call(()));
    }
    assert!(store.close());

    assert_eq!(confirmed.get(), 1);
    assert_eq!(closed.get(), 1);
    assert_eq!(guard.outcome(), Some(ModalOutcome::Confirmed));
    assert_eq!(store.session(), &ModalSession::Closed);

    // Closing again is a no-op and does not re-run the hook.
    assert!(!store.close());
    assert_eq!(closed.get(), 1);
}

#[test]
fn every_modal_kind_resolves_to_a_view() {
    let registry = registry();
    for id in ModalId::ALL {
        let descriptor = registry.lookup(id);
        assert_eq!(descriptor.id, id);
        assert!(!descriptor.default_title.is_empty());
    }
    assert!(registry.lookup_name("delete_artifact").is_ok());
    assert!(registry.lookup_name("does_not_exist").is_err());
}

#[test]
fn ending_the_session_leaves_nothing_for_the_next_one() {
    let registry = registry();
    let keep_mounted = |id: ModalId| !registry.lookup(id).options.destroy_on_close;
    let mut store = ModalStore::new();
    let mut host = ModalHost::new();
    host.navigate("/orgs/acme/projects/P1");

    let closed = Rc::new(Cell::new(0));
    let on_close_complete = {
        let closed = closed.clone();
        Handler::new(move |()| closed.set(closed.get() + 1))
    };
    ModalApi::new(&mut store).open_delete_artifact(
        DeleteArtifactProps::new(
            ArtifactRef {
                id: "A1".to_string(),
                title: "Login bug".to_string(),
            },
            Handler::new(|()| {}),
        )
        .with_close_complete(on_close_complete),
        None,
    );
    assert!(host.frame(store.current(), keep_mounted).is_some());

    // Sign-out closes the slot, then the signed-in shell unmounts its host.
    assert!(store.close());
    host.detach();
    assert_eq!(closed.get(), 1);

    // Signing back in mounts a fresh host on a different page.
    let mut host = ModalHost::new();
    assert!(!host.navigate("/"));
    assert_eq!(host.frame(store.current(), keep_mounted), None);
}
