//! Process-wide debug observer registry
//!
//! One explicitly-owned registry object, created at process start and
//! shared by handle. Registration and removal are idempotent and guarded
//! by a lock; notification snapshots the observer list and fans out
//! outside the lock so a slow observer cannot block registration.

use super::handler::{BuildEvent, BuildObserver};
use std::sync::{Arc, Mutex};

/// Cloneable handle to a shared set of build observers. No ordering
/// guarantees between observers.
#[derive(Clone, Default)]
pub struct DebugObserverRegistry {
    observers: Arc<Mutex<Vec<Arc<dyn BuildObserver>>>>,
}

impl DebugObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Adding the same observer twice is a no-op;
    /// identity is pointer identity of the `Arc`.
    pub fn add(&self, observer: Arc<dyn BuildObserver>) {
        let mut observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        if !observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            observers.push(observer);
        }
    }

    /// Remove an observer. Removing one that was never registered is a
    /// no-op.
    pub fn remove(&self, observer: &Arc<dyn BuildObserver>) {
        let mut observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        observers.retain(|o| !Arc::ptr_eq(o, observer));
    }

    pub fn len(&self) -> usize {
        self.observers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fan an event out to every registered observer
    pub fn notify(&self, event: &BuildEvent) {
        let snapshot: Vec<_> = {
            let observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
            observers.clone()
        };
        for observer in snapshot {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParticipantKey;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct CountingObserver {
        count: AtomicUsize,
    }

    impl BuildObserver for CountingObserver {
        fn on_event(&self, _event: &BuildEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn step_event() -> BuildEvent {
        BuildEvent::StepCompleted {
            build_id: Uuid::new_v4(),
            key: ParticipantKey::new("p", "g", "e"),
            touched: BTreeSet::new(),
            failed: false,
        }
    }

    #[test]
    fn test_double_add_is_idempotent() {
        let registry = DebugObserverRegistry::new();
        let observer: Arc<dyn BuildObserver> = Arc::new(CountingObserver {
            count: AtomicUsize::new(0),
        });
        registry.add(observer.clone());
        registry.add(observer.clone());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_unregistered_is_noop() {
        let registry = DebugObserverRegistry::new();
        let observer: Arc<dyn BuildObserver> = Arc::new(CountingObserver {
            count: AtomicUsize::new(0),
        });
        registry.remove(&observer);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_notify_reaches_all_observers() {
        let registry = DebugObserverRegistry::new();
        let a = Arc::new(CountingObserver {
            count: AtomicUsize::new(0),
        });
        let b = Arc::new(CountingObserver {
            count: AtomicUsize::new(0),
        });
        registry.add(a.clone());
        registry.add(b.clone());

        registry.notify(&step_event());
        registry.notify(&step_event());

        assert_eq!(a.count.load(Ordering::SeqCst), 2);
        assert_eq!(b.count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_removed_observer_stops_receiving() {
        let registry = DebugObserverRegistry::new();
        let observer = Arc::new(CountingObserver {
            count: AtomicUsize::new(0),
        });
        let handle: Arc<dyn BuildObserver> = observer.clone();
        registry.add(handle.clone());
        registry.notify(&step_event());
        registry.remove(&handle);
        registry.notify(&step_event());
        assert_eq!(observer.count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_handles_see_one_registry() {
        let registry = DebugObserverRegistry::new();
        let clone = registry.clone();
        let observer: Arc<dyn BuildObserver> = Arc::new(CountingObserver {
            count: AtomicUsize::new(0),
        });
        clone.add(observer);
        assert_eq!(registry.len(), 1);
    }
}
