//! Modal orchestration.
//!
//! One global slot holds at most one open modal. Screens open modals through
//! the typed [`ModalApi`], which only accepts the payload type registered for
//! each [`ModalId`]; the UI crate's manager renders whatever the
//! [`ModalStore`] currently holds, resolving the body view lazily through the
//! [`ModalRegistry`].

mod api;
mod guard;
mod host;
mod id;
mod props;
mod registry;
mod store;

pub use api::{ModalApi, ModalSink};
pub use guard::{ModalOutcome, NavigationTracker, SubmitLatch, TerminalGuard};
pub use host::{HostFrame, ModalHost};
pub use id::{ModalError, ModalId};
pub use props::*;
pub use registry::{
    standard_descriptors, LazyView, MaxWidth, ModalDescriptor, ModalOptions, ModalRegistry,
};
pub use store::{ModalSession, ModalStore, OpenModal, OpenOptions, PendingClose};
