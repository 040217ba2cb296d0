use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::{ChannelError, Event, EventChannel, Listener, ListenerError, ListenerId, Result};

#[derive(Default)]
struct Registry {
    listeners: RwLock<HashMap<String, Vec<(ListenerId, Listener)>>>,
    next_id: AtomicU64,
}

/// Process-wide event channel backed by an in-memory listener registry.
///
/// Clones share the same registry. The registry lock is released before any
/// listener runs, so listeners may publish, subscribe and unsubscribe
/// re-entrantly. Each `publish` works on the listeners registered when it
/// started.
#[derive(Clone, Default)]
pub struct InProcessEventChannel {
    registry: Arc<Registry>,
}

impl InProcessEventChannel {
    /// Creates a new channel with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that does not keep the registry alive.
    ///
    /// Listeners that need to publish replies hold this instead of a clone,
    /// otherwise the registry would own itself through them.
    pub fn downgrade(&self) -> WeakEventChannel {
        WeakEventChannel {
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Returns the total number of registrations across all names.
    pub fn total_listeners(&self) -> usize {
        self.registry
            .listeners
            .read()
            .expect("listener registry lock poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }

    fn snapshot(&self, name: &str) -> Vec<Listener> {
        self.registry
            .listeners
            .read()
            .expect("listener registry lock poisoned")
            .get(name)
            .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for InProcessEventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InProcessEventChannel")
            .field("listeners", &self.total_listeners())
            .finish()
    }
}

impl EventChannel for InProcessEventChannel {
    fn publish(&self, event: Event) -> Result<()> {
        let listeners = self.snapshot(&event.name);
        metrics::counter!("event_channel_published_total").increment(1);

        if listeners.is_empty() {
            tracing::debug!(event = %event.name, "published with no listeners");
            return Ok(());
        }

        let mut failures: Vec<ListenerError> = Vec::new();
        for listener in &listeners {
            if let Err(err) = listener(&event) {
                metrics::counter!("event_channel_listener_failures_total").increment(1);
                tracing::error!(
                    event = %event.name,
                    event_id = %event.event_id,
                    error = %err,
                    "listener failed"
                );
                failures.push(err);
            }
        }

        let failed = failures.len();
        match failures.into_iter().next() {
            None => Ok(()),
            Some(first) => Err(ChannelError::ListenerFailed {
                name: event.name,
                delivered: listeners.len(),
                failed,
                first,
            }),
        }
    }

    fn subscribe(&self, name: &str, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        self.registry
            .listeners
            .write()
            .expect("listener registry lock poisoned")
            .entry(name.to_string())
            .or_default()
            .push((id, listener));
        tracing::trace!(event = %name, listener = %id, "listener subscribed");
        id
    }

    fn remove_specific_listener(&self, name: &str) -> usize {
        let removed = self
            .registry
            .listeners
            .write()
            .expect("listener registry lock poisoned")
            .remove(name)
            .map(|entries| entries.len())
            .unwrap_or(0);
        if removed > 0 {
            tracing::debug!(event = %name, removed, "listeners removed");
        }
        removed
    }

    fn unsubscribe(&self, name: &str, id: ListenerId) -> bool {
        let mut listeners = self
            .registry
            .listeners
            .write()
            .expect("listener registry lock poisoned");
        let Some(entries) = listeners.get_mut(name) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        let removed = entries.len() < before;
        if entries.is_empty() {
            listeners.remove(name);
        }
        removed
    }

    fn listener_count(&self, name: &str) -> usize {
        self.registry
            .listeners
            .read()
            .expect("listener registry lock poisoned")
            .get(name)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Non-owning handle to an [`InProcessEventChannel`].
#[derive(Clone)]
pub struct WeakEventChannel {
    registry: Weak<Registry>,
}

impl WeakEventChannel {
    /// Returns the channel if it is still alive.
    pub fn upgrade(&self) -> Option<InProcessEventChannel> {
        self.registry
            .upgrade()
            .map(|registry| InProcessEventChannel { registry })
    }
}
