//! The global modal slot.
//!
//! Screens open modals through [`modal_api`]; bodies and the manager close
//! them through [`close_modal`]. All writes go through these functions so
//! the close hook never runs while the signal is borrowed.

use alm_core::modal::{
    ModalApi, ModalId, ModalOutcome, ModalPatch, ModalProps, ModalSink, ModalStore, OpenOptions,
    TerminalGuard,
};
use dioxus::prelude::*;

pub static MODAL: GlobalSignal<ModalStore> = Signal::global(ModalStore::new);

/// [`ModalSink`] writing to [`MODAL`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalModal;

impl ModalSink for GlobalModal {
    fn open(&mut self, props: ModalProps, options: OpenOptions) {
        open_modal(props, options);
    }
}

/// Typed facade over the global slot.
///
/// ```rust,ignore
/// modal_api().open_confirm(ConfirmProps::new(msg, on_confirm), None);
/// ```
pub fn modal_api() -> ModalApi<GlobalModal> {
    ModalApi::new(GlobalModal)
}

pub fn open_modal(props: ModalProps, options: OpenOptions) -> u64 {
    MODAL.write().open(props, options)
}

/// Run the open session's `on_close_complete` and clear the slot. The hook
/// runs with no borrow held, so it may open another modal; that new session
/// survives.
pub fn close_modal() -> bool {
    let Some(pending) = MODAL.peek().begin_close() else {
        return false;
    };
    if let Some(hook) = &pending.hook {
        hook.call(());
    }
    MODAL.write().finish_close(pending.seq)
}

/// Close only if session `seq` is still the open one. Bodies use this so a
/// late callback from a replaced session cannot close its successor.
pub fn close_session(seq: u64) -> bool {
    let is_current = MODAL.peek().current().is_some_and(|open| open.seq == seq);
    is_current && close_modal()
}

/// Close the open modal if it is of kind `id`. Screens use this after an
/// async operation finishes, when the user may have moved on to another
/// modal.
pub fn close_if_open(id: ModalId) -> bool {
    let is_open = MODAL.peek().current().is_some_and(|open| open.id() == id);
    is_open && close_modal()
}

/// Dismiss session `seq`: the cancel callback runs unless the session
/// already settled, then the modal closes.
pub fn dismiss_session(seq: u64, guard: &TerminalGuard) {
    let on_cancel = MODAL
        .peek()
        .current()
        .filter(|open| open.seq == seq)
        .and_then(|open| open.props.on_cancel().cloned());
    guard.settle(ModalOutcome::Cancelled, || {
        if let Some(on_cancel) = on_cancel {
            on_cancel.call(());
        }
    });
    close_session(seq);
}

/// Shallow-merge into the open modal's props. No-op when closed or when the
/// patch is for a different modal kind.
pub fn update_modal_props(patch: impl Into<ModalPatch>) -> bool {
    let patch = patch.into();
    if !MODAL.peek().is_open() {
        return false;
    }
    MODAL.write().update_props(patch)
}
