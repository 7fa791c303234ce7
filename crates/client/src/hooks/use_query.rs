use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use alm_core::QueryKey;
use alm_shared::ApiError;
use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::stores::QUERY_CACHE;

/// A `use_resource` bound to a cache key.
///
/// The key is registered in [`QUERY_CACHE`] while the component is mounted.
/// Whenever something invalidates it (a mutation on this screen, or a
/// realtime event) the key's generation bumps and `fetch` runs again. A new
/// `key` on re-render (route params changed) also re-fetches. A 401 ends
/// the session.
///
/// ### Example
///
/// ```rust,ignore
/// let artifacts = use_query(QueryKey::project_artifacts(&org, &project), move |_| {
///     let (org, project) = (org.clone(), project.clone());
///     async move { auth.client().list_artifacts(&org, &project).await }
/// });
/// ```
pub fn use_query<T, F, Fut>(key: QueryKey, mut fetch: F) -> Resource<Result<T, ApiError>>
where
    T: 'static,
    F: FnMut(QueryKey) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let mut tracked = use_signal(|| key.clone());
    if *tracked.peek() != key {
        tracked.set(key.clone());
    }

    let auth = try_use_context::<AuthContext>();

    let registered = use_hook(|| Rc::new(RefCell::new(None::<QueryKey>)));
    {
        let registered = registered.clone();
        use_effect(move || {
            let key = tracked();
            let previous = registered.borrow_mut().replace(key.clone());
            if previous.as_ref() == Some(&key) {
                return;
            }
            let mut cache = QUERY_CACHE.write();
            if let Some(previous) = previous {
                cache.unregister(&previous);
            }
            cache.register(key);
        });
    }
    use_drop(move || {
        if let Some(key) = registered.borrow_mut().take() {
            QUERY_CACHE.write().unregister(&key);
        }
    });

    // Only a generation change re-runs the fetch; other cache writes
    // (registrations, `mark_fresh`) leave the memo value unchanged.
    let generation = use_memo(move || QUERY_CACHE.read().generation(&tracked()));

    use_resource(move || {
        let key = tracked();
        let _ = generation();
        let request = fetch(key.clone());
        async move {
            let result = request.await;
            if let Err(e) = &result {
                crate::log_warn!("query {} failed: {}", key, e);
                if e.is_unauthorized() {
                    if let Some(mut auth) = auth {
                        auth.logout();
                    }
                }
            }
            QUERY_CACHE.write().mark_fresh(&key);
            result
        }
    })
}
