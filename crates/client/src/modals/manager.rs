use std::cell::RefCell;
use std::rc::Rc;

use alm_core::modal::{ModalHost, ModalId, TerminalGuard};
use dioxus::prelude::*;

use super::frame::{ModalFrame, ModalPlaceholder};
use super::registry::{descriptor, registry, ModalBodyProps, ModalView};
use crate::routes::Route;
use crate::stores::{close_modal, MODAL};

/// The single mount point for modals, rendered inside the router shell.
///
/// Renders nothing while the slot is closed, except for the last body of a
/// kind registered with `destroy_on_close = false`: that one stays mounted
/// (hidden) until a different kind opens or the route changes, so reopening
/// it on the same page finds its local state intact. Any route change
/// closes the open modal, and so does unmounting the manager.
#[component]
pub fn ModalManager() -> Element {
    let route = use_route::<Route>();
    let current_location = route.to_string();
    let mut location = use_signal(|| current_location.clone());
    if *location.peek() != current_location {
        location.set(current_location);
    }

    let host = use_hook(|| Rc::new(RefCell::new(ModalHost::new())));
    let mut epoch = use_signal(|| 0u64);
    use_effect({
        let host = host.clone();
        move || {
            let location = location();
            let mut host = host.borrow_mut();
            if host.navigate(&location) {
                epoch.set(host.epoch());
                drop(host);
                if MODAL.peek().is_open() {
                    crate::log_debug!("navigated to {}, closing modal", location);
                    close_modal();
                }
            }
        }
    });

    use_drop({
        let host = host.clone();
        move || {
            host.borrow_mut().detach();
            if close_modal() {
                crate::log_debug!("modal host unmounted, closed the open modal");
            }
        }
    });

    let guards = use_hook(|| Rc::new(RefCell::new(None::<(u64, TerminalGuard)>)));

    let frame = host
        .borrow_mut()
        .frame(MODAL.read().current(), |id| !descriptor(id).options.destroy_on_close);
    let Some(frame) = frame else {
        return rsx! {};
    };
    let (session, visible) = (frame.session, frame.visible);

    let id = session.id();
    let options = descriptor(id).options;
    let frame_key = if options.destroy_on_close {
        format!("session-{}", session.seq)
    } else {
        format!("kept-{id}-{}", epoch())
    };
    let title = registry().title_for(&session).to_string();
    let guard = session_guard(&guards, session.seq);

    rsx! {
        ModalFrame {
            key: "{frame_key}",
            seq: session.seq,
            title,
            max_width: options.max_width,
            visible,
            guard: guard.clone(),
            LazyBody {
                id,
                body: ModalBodyProps {
                    seq: session.seq,
                    revision: session.revision,
                    props: session.props,
                    guard,
                },
            }
        }
    }
}

/// One guard per session, shared by the body and the frame's dismiss path.
fn session_guard(slot: &RefCell<Option<(u64, TerminalGuard)>>, seq: u64) -> TerminalGuard {
    let mut slot = slot.borrow_mut();
    match &*slot {
        Some((current, guard)) if *current == seq => guard.clone(),
        _ => {
            let guard = TerminalGuard::new();
            *slot = Some((seq, guard.clone()));
            guard
        }
    }
}

/// Placeholder until the kind's view resolves, then the body.
#[component]
fn LazyBody(id: ModalId, body: ModalBodyProps) -> Element {
    let mut ready = use_signal(move || descriptor(id).view.is_resolved());
    use_effect(move || {
        if !*ready.peek() {
            descriptor(id).view.resolve();
            crate::log_debug!("modal view '{}' resolved", id);
            ready.set(true);
        }
    });

    match descriptor(id).view.get() {
        Some(view) if ready() => rsx! {
            ModalBodyHost { view: *view, body }
        },
        _ => rsx! {
            ModalPlaceholder {}
        },
    }
}

#[component]
fn ModalBodyHost(view: ModalView, body: ModalBodyProps) -> Element {
    view(body)
}
