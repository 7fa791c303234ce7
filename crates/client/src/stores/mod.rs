//! Global stores for application state.

pub mod modal;
pub mod notifications;
pub mod query_cache;

pub use modal::{
    close_if_open, close_modal, close_session, dismiss_session, modal_api, open_modal,
    update_modal_props, GlobalModal, MODAL,
};
pub use notifications::{dismiss, notify, GlobalNotifier, NOTIFICATIONS};
pub use query_cache::{invalidate_prefix, GlobalQueryCache, QUERY_CACHE};
