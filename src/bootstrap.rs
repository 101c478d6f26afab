//! One-time construction guard for the application's notifier
//!
//! The original host pattern here is a load-time hook that materializes a
//! long-lived singleton before anything else runs. Outside such a host the
//! equivalent is an explicit call in the startup sequence: the composition
//! root owns a [`KeyboardBootstrap`] and calls [`ensure`](KeyboardBootstrap::ensure)
//! once, then hands [`KeyboardNotifier`] clones to whatever needs them.

use std::sync::OnceLock;

use crate::notifier::{KeyboardNotifier, NotifierConfig};

/// Idempotent construction guard for a [`KeyboardNotifier`].
///
/// The first [`ensure`](Self::ensure) constructs the notifier; every later
/// call, from any thread, returns the same instance. Construction is `const`,
/// so the guard can live in a `static` when the host entry point cannot
/// thread a value through:
///
/// ```
/// use host_keyboard::KeyboardBootstrap;
///
/// static KEYBOARD: KeyboardBootstrap = KeyboardBootstrap::new();
///
/// let notifier = KEYBOARD.ensure();
/// let same = KEYBOARD.ensure();
/// assert!(notifier.ptr_eq(same));
/// ```
pub struct KeyboardBootstrap {
    config: NotifierConfig,
    slot: OnceLock<KeyboardNotifier>,
}

impl KeyboardBootstrap {
    /// Creates a guard that builds its notifier with the default config.
    pub const fn new() -> Self {
        Self::with_config(NotifierConfig::new())
    }

    /// Creates a guard that builds its notifier with `config`.
    pub const fn with_config(config: NotifierConfig) -> Self {
        Self {
            config,
            slot: OnceLock::new(),
        }
    }

    /// Returns the notifier, constructing it on first call.
    ///
    /// Safe to call from any number of threads at once; exactly one notifier
    /// is ever constructed, and every call observes it.
    pub fn ensure(&self) -> &KeyboardNotifier {
        self.slot
            .get_or_init(|| KeyboardNotifier::with_config(self.config))
    }

    /// Returns the notifier if [`ensure`](Self::ensure) has already run.
    pub fn get(&self) -> Option<&KeyboardNotifier> {
        self.slot.get()
    }
}

impl Default for KeyboardBootstrap {
    fn default() -> Self {
        Self::new()
    }
}
