use std::collections::HashMap;

use super::{QueryKey, QueryKeyMatcher};

#[derive(Debug, Clone, Default, PartialEq)]
struct Entry {
    generation: u64,
    stale: bool,
    subscribers: usize,
}

/// Bookkeeping for the client-side cache: which keys are mounted, and a
/// generation counter per key that bumps on every invalidation. Query hooks
/// re-fetch when the generation of their key changes; the fetched data
/// itself lives with the hook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryCacheState {
    entries: HashMap<QueryKey, Entry>,
}

impl QueryCacheState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A query bound to `key` mounted.
    pub fn register(&mut self, key: QueryKey) {
        self.entries.entry(key).or_default().subscribers += 1;
    }

    /// A query bound to `key` unmounted. The entry is forgotten once no
    /// query holds it.
    pub fn unregister(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers == 0 {
                self.entries.remove(key);
            }
        }
    }

    pub fn generation(&self, key: &QueryKey) -> u64 {
        self.entries.get(key).map_or(0, |e| e.generation)
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.stale)
    }

    /// A fetch for `key` completed.
    pub fn mark_fresh(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.stale = false;
        }
    }

    /// Mark every matching entry stale and bump its generation. Returns how
    /// many entries matched; absent keys are simply not touched.
    pub fn invalidate(&mut self, matcher: &QueryKeyMatcher) -> usize {
        let mut hits = 0;
        for (key, entry) in self.entries.iter_mut() {
            if matcher.matches(key) {
                entry.generation += 1;
                entry.stale = true;
                hits += 1;
            }
        }
        tracing::debug!(hits, ?matcher, "query cache invalidated");
        hits
    }

    pub fn keys(&self) -> impl Iterator<Item = &QueryKey> {
        self.entries.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidation_bumps_only_matching_entries() {
        let mut cache = QueryCacheState::new();
        let artifacts = QueryKey::project_artifacts("acme", "P1");
        let members = QueryKey::project_members("acme", "P1");
        let other = QueryKey::project_artifacts("acme", "P2");
        cache.register(artifacts.clone());
        cache.register(members.clone());
        cache.register(other.clone());

        let hits = cache.invalidate(&QueryKeyMatcher::project("P1"));

        assert_eq!(hits, 2);
        assert_eq!(cache.generation(&artifacts), 1);
        assert_eq!(cache.generation(&members), 1);
        assert_eq!(cache.generation(&other), 0);
        assert!(cache.is_stale(&artifacts));
        assert!(!cache.is_stale(&other));

        cache.mark_fresh(&artifacts);
        assert!(!cache.is_stale(&artifacts));
    }

    #[test]
    fn invalidating_absent_keys_is_harmless() {
        let mut cache = QueryCacheState::new();
        assert_eq!(cache.invalidate(&QueryKeyMatcher::project("nope")), 0);
        assert_eq!(cache.generation(&QueryKey::orgs()), 0);
    }

    #[test]
    fn entries_live_while_subscribed() {
        let mut cache = QueryCacheState::new();
        let key = QueryKey::orgs();
        cache.register(key.clone());
        cache.register(key.clone());
        cache.invalidate(&QueryKeyMatcher::prefix(&key));

        cache.unregister(&key);
        assert_eq!(cache.generation(&key), 1);
        cache.unregister(&key);
        assert_eq!(cache.generation(&key), 0);
        assert_eq!(cache.keys().count(), 0);
    }
}
