//! Shared query cache bookkeeping.

use alm_core::{QueryCache, QueryCacheState, QueryKey, QueryKeyMatcher};
use dioxus::prelude::*;

pub static QUERY_CACHE: GlobalSignal<QueryCacheState> = Signal::global(QueryCacheState::new);

/// [`QueryCache`] backed by [`QUERY_CACHE`]. Invalidation bumps the
/// generation of every matching key, which re-runs the `use_query` hooks
/// bound to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalQueryCache;

impl QueryCache for GlobalQueryCache {
    fn invalidate(&self, matcher: &QueryKeyMatcher) {
        QUERY_CACHE.write().invalidate(matcher);
    }
}

/// Re-fetch `key` and everything below it.
pub fn invalidate_prefix(key: &QueryKey) {
    GlobalQueryCache.invalidate(&QueryKeyMatcher::prefix(key));
}
