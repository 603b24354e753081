//! Process-wide behavior cache, keyed by model type identity.
//!
//! Each model type moves through `Unseen → Building → Ready`; a failed
//! build is not recorded, so the next request restarts from `Unseen`.
//! `Ready` is terminal. The per-type state is a [`TypeCell`]: a build lock
//! plus a write-once slot, so concurrent first-time requests for one type
//! collapse into a single build while unrelated types never serialize on
//! each other. The global map's mutex is held only long enough to fetch or
//! insert the cell, never across a build.
//!
//! # Invariants
//!
//! 1. At most one *successful* build per type per process lifetime.
//! 2. All callers observe the same `Arc` once a type is `Ready`.
//! 3. A build error propagates to exactly the callers that ran or awaited
//!    that build attempt; nothing is cached.
//! 4. No eviction; lifetime = process lifetime.

use std::any::TypeId;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use ahash::AHashMap;

use crate::behavior::SynthesizedBehavior;

/// Per-type cell: build lock + write-once result slot.
#[derive(Default)]
struct TypeCell {
    build: Mutex<()>,
    slot: OnceLock<Arc<SynthesizedBehavior>>,
}

/// Behavior registry keyed by `TypeId`.
///
/// The process-global instance is [`global`]; separate instances exist
/// only in tests.
#[derive(Default)]
pub struct BehaviorCache {
    cells: Mutex<AHashMap<TypeId, Arc<TypeCell>>>,
}

static GLOBAL: OnceLock<BehaviorCache> = OnceLock::new();

/// The process-global cache used by the entry point.
pub fn global() -> &'static BehaviorCache {
    GLOBAL.get_or_init(BehaviorCache::new)
}

impl BehaviorCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached behavior for `key`, building it if this is the
    /// first (successful) request.
    ///
    /// `build` runs at most once per key across all threads; racing
    /// callers block on the per-key lock and then observe the winner's
    /// result. If `build` fails, nothing is stored and the error goes to
    /// the caller whose attempt it was.
    ///
    /// # Errors
    ///
    /// Whatever `build` returns.
    pub fn get_or_build<E, F>(&self, key: TypeId, build: F) -> Result<Arc<SynthesizedBehavior>, E>
    where
        F: FnOnce() -> Result<SynthesizedBehavior, E>,
    {
        let cell = {
            let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cells.entry(key).or_default())
        };

        if let Some(ready) = cell.slot.get() {
            return Ok(Arc::clone(ready));
        }

        let _building = cell.build.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(ready) = cell.slot.get() {
            return Ok(Arc::clone(ready));
        }

        tracing::debug!(?key, "building behavior");
        let built = Arc::new(build()?);
        // First (and only) publication for this key; a losing `set` cannot
        // happen while we hold the build lock.
        let _ = cell.slot.set(Arc::clone(&built));
        Ok(built)
    }

    /// Whether `key` is `Ready`.
    #[must_use]
    pub fn contains(&self, key: TypeId) -> bool {
        let cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.get(&key).is_some_and(|cell| cell.slot.get().is_some())
    }

    /// Number of `Ready` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells
            .values()
            .filter(|cell| cell.slot.get().is_some())
            .count()
    }

    /// Whether no entry is `Ready`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propnotify_schema::{InvocatorSpec, ModelDescriptor, PropertySpec, ValueKind, validate};

    fn fresh_behavior() -> SynthesizedBehavior {
        let desc = ModelDescriptor::builder("Cached")
            .property(PropertySpec::new("reading", ValueKind::Int).notify())
            .invocator(InvocatorSpec::published())
            .build();
        crate::behavior::synthesize(&validate(Some(&desc)).expect("well-shaped"))
    }

    struct KeyA;
    struct KeyB;

    #[test]
    fn second_request_reuses_the_first_result() {
        let cache = BehaviorCache::new();
        let first = cache
            .get_or_build::<(), _>(TypeId::of::<KeyA>(), || Ok(fresh_behavior()))
            .expect("build succeeds");
        let second = cache
            .get_or_build::<(), _>(TypeId::of::<KeyA>(), || panic!("must not rebuild"))
            .expect("cached");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn distinct_keys_build_independently() {
        let cache = BehaviorCache::new();
        let a = cache
            .get_or_build::<(), _>(TypeId::of::<KeyA>(), || Ok(fresh_behavior()))
            .expect("a");
        let b = cache
            .get_or_build::<(), _>(TypeId::of::<KeyB>(), || Ok(fresh_behavior()))
            .expect("b");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_build_is_not_cached() {
        let cache = BehaviorCache::new();
        let err = cache
            .get_or_build(TypeId::of::<KeyA>(), || Err::<_, &str>("broken"))
            .unwrap_err();
        assert_eq!(err, "broken");
        assert!(!cache.contains(TypeId::of::<KeyA>()));

        // Failed → Unseen: a later attempt may succeed.
        let rebuilt = cache
            .get_or_build::<(), _>(TypeId::of::<KeyA>(), || Ok(fresh_behavior()))
            .expect("retry succeeds");
        assert!(cache.contains(TypeId::of::<KeyA>()));
        assert_eq!(rebuilt.type_name(), "Cached");
    }

    #[test]
    fn empty_cache_reports_empty() {
        let cache = BehaviorCache::new();
        assert!(cache.is_empty());
        assert!(!cache.contains(TypeId::of::<KeyA>()));
    }
}
