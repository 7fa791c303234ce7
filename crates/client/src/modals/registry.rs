use alm_core::modal::{
    standard_descriptors, LazyView, ModalDescriptor, ModalId, ModalProps, ModalRegistry,
    TerminalGuard,
};
use dioxus::prelude::*;
use once_cell::sync::Lazy;

use super::bodies;

/// What every modal body receives: the session it belongs to, its typed
/// props and the guard shared with the frame's dismiss path.
#[derive(Props, Clone, PartialEq)]
pub struct ModalBodyProps {
    pub seq: u64,
    /// Props revision within the session; moves on every screen patch.
    pub revision: u64,
    pub props: ModalProps,
    pub guard: TerminalGuard,
}

/// A modal body. Called from a host component keyed per session, so its
/// hooks always run in the same order.
pub type ModalView = fn(ModalBodyProps) -> Element;

static REGISTRY: Lazy<ModalRegistry<LazyView<ModalView>>> = Lazy::new(|| {
    match ModalRegistry::new(standard_descriptors(view_for)) {
        Ok(registry) => registry,
        Err(e) => panic!("modal registry is misconfigured: {e}"),
    }
});

fn view_for(id: ModalId) -> LazyView<ModalView> {
    match id {
        ModalId::DeleteArtifact => LazyView::new(|| bodies::delete_artifact as ModalView),
        ModalId::EditTask => LazyView::new(|| bodies::edit_task as ModalView),
        ModalId::ProjectMembers => LazyView::new(|| bodies::project_members as ModalView),
        ModalId::CreateProject => LazyView::new(|| bodies::create_project as ModalView),
        ModalId::CreateArtifact => LazyView::new(|| bodies::create_artifact as ModalView),
        ModalId::LinkArtifact => LazyView::new(|| bodies::link_artifact as ModalView),
        ModalId::InviteMember => LazyView::new(|| bodies::invite_member as ModalView),
        ModalId::Confirm => LazyView::new(|| bodies::confirm as ModalView),
    }
}

pub fn registry() -> &'static ModalRegistry<LazyView<ModalView>> {
    &REGISTRY
}

pub fn descriptor(id: ModalId) -> &'static ModalDescriptor<LazyView<ModalView>> {
    registry().lookup(id)
}
