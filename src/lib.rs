//! Typed soft-keyboard state notifications for embedded applications
//!
//! Applications embedded in a native host (an Android activity, an iOS view
//! controller) do not own the soft keyboard; the host does, and it reports
//! keyboard changes as an untyped string payload carrying the occluded
//! height. This crate turns that raw signal into a typed, in-process
//! broadcast the rest of the application can subscribe to.
//!
//! # Architecture
//!
//! - **KeyboardState**: normalized `Hidden` / `Shown { height }` state;
//!   non-positive height reports always read as a dismissed keyboard
//! - **KeyboardNotifier**: parses raw payloads and fans the state out,
//!   synchronously and in registration order, to registered listeners
//! - **KeyboardBootstrap**: idempotent one-time construction guard owned by
//!   the application's composition root
//! - **HostFeed**: cross-thread queue for payloads arriving on host threads
//!
//! # Example
//!
//! ```
//! use host_keyboard::KeyboardBootstrap;
//!
//! static KEYBOARD: KeyboardBootstrap = KeyboardBootstrap::new();
//!
//! let notifier = KEYBOARD.ensure();
//! let _shift_ui = notifier.register(|state| {
//!     if state.visible() {
//!         // lift the focused field above state.height() pixels
//!     }
//! });
//!
//! // Raw payloads arrive from the host side:
//! notifier.ingest("240"); // shown, 240 pixels
//! notifier.ingest("0");   // hidden
//! ```

#![warn(missing_docs)]

mod bootstrap;
mod feed;
mod notifier;
mod state;

pub use bootstrap::*;
pub use feed::*;
pub use notifier::*;
pub use state::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{bootstrap::*, feed::*, notifier::*, state::*};
}
