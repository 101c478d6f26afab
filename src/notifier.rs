//! Listener registry and broadcast dispatch for keyboard state changes

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error};

use crate::state::KeyboardState;

/// Configuration for a [`KeyboardNotifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Log every raw payload at debug level before parsing.
    ///
    /// On by default, mirroring the log switch native keyboard plugins flip
    /// on at init; emission is still subject to the `log` level filter.
    pub log_payloads: bool,
}

impl NotifierConfig {
    /// Default configuration: payload logging on.
    pub const fn new() -> Self {
        Self { log_payloads: true }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle identifying one listener registration.
///
/// Issued by [`KeyboardNotifier::register`] and meaningful only for the
/// notifier that issued it. Ids are never reused, so unregistering with a
/// stale id is always a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(KeyboardState) + Send + Sync>;

struct Registry {
    config: NotifierConfig,
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
}

/// Broadcast hub turning raw host payloads into typed keyboard state events.
///
/// Cloning a notifier clones a handle, not the notifier: every clone shares
/// the same listener registry, so components can each hold their own handle
/// to the one instance the application constructed.
///
/// Listeners are invoked synchronously on the thread calling
/// [`ingest`](Self::ingest), in registration order. The notifier keeps no
/// last-known state; a listener registered after an ingest only ever sees
/// future ingests.
#[derive(Clone)]
pub struct KeyboardNotifier {
    inner: Arc<Registry>,
}

impl KeyboardNotifier {
    /// Creates a notifier with the default configuration.
    pub fn new() -> Self {
        Self::with_config(NotifierConfig::default())
    }

    /// Creates a notifier with an explicit configuration.
    pub fn with_config(config: NotifierConfig) -> Self {
        Self {
            inner: Arc::new(Registry {
                config,
                next_id: AtomicU64::new(0),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Registers a listener and returns the handle that removes it again.
    ///
    /// Every call is an independent registration: registering the same
    /// callback a second time delivers each broadcast to it twice. Duplicates
    /// are deliberately not coalesced.
    pub fn register<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(KeyboardState) + Send + Sync + 'static,
    {
        let id = ListenerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock_listeners().push((id, Arc::new(listener)));
        id
    }

    /// Removes the registration identified by `id`.
    ///
    /// Returns `false`, with no other effect, when the id was never issued
    /// here or was already removed. Removing a listener never fails.
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|(entry, _)| *entry != id);
        listeners.len() != before
    }

    /// Number of live registrations.
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    /// Feeds one raw host payload into the notifier.
    ///
    /// The payload is parsed as a decimal keyboard height and normalized
    /// into a [`KeyboardState`], which is then broadcast synchronously on the
    /// calling thread to every listener registered when the call started. A
    /// payload that does not parse is logged and dropped: it reaches no
    /// listener and never surfaces as an error to the caller.
    pub fn ingest(&self, payload: &str) {
        if self.inner.config.log_payloads {
            debug!("keyboard payload received: {payload:?}");
        }
        let state = match KeyboardState::parse(payload) {
            Ok(state) => state,
            Err(err) => {
                error!("dropping malformed keyboard payload: {err}");
                return;
            }
        };
        self.dispatch(state);
    }

    /// Whether `other` is a handle to this same notifier.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn dispatch(&self, state: KeyboardState) {
        // Snapshot under the lock, invoke outside it: listeners may register
        // or unregister (themselves included) from inside their callback, and
        // those changes only apply from the next ingest.
        let snapshot: Vec<Listener> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(state);
        }
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(ListenerId, Listener)>> {
        // The lock is never held while callbacks run, so a panicking listener
        // cannot leave the registry poisoned mid-dispatch.
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for KeyboardNotifier {
    fn default() -> Self {
        Self::new()
    }
}
