//! Cross-thread payload queue between host glue and the notifier
//!
//! Native hosts rarely invoke their callbacks on the application's own
//! thread. [`HostFeed`] lets the glue queue raw payloads from any thread and
//! lets the application drain them into its notifier wherever its loop runs,
//! keeping dispatch itself single-threaded.

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::notifier::KeyboardNotifier;

/// Source of raw keyboard payloads in arrival order.
pub trait PayloadFeed: Send + Sync {
    /// Queue one raw payload.
    fn push(&self, payload: String);

    /// Take the oldest queued payload, if any (non-blocking).
    fn try_pop(&self) -> Option<String>;
}

/// Unbounded multi-producer queue of raw host payloads.
pub struct HostFeed {
    sender: Sender<String>,
    receiver: Receiver<String>,
}

impl Default for HostFeed {
    fn default() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }
}

impl HostFeed {
    /// Creates an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one raw payload; callable from any thread.
    pub fn push(&self, payload: impl Into<String>) {
        let _ = self.sender.send(payload.into());
    }

    /// Take the oldest queued payload, if any (non-blocking).
    pub fn try_pop(&self) -> Option<String> {
        self.receiver.try_recv().ok()
    }

    /// Get a clone of the producer side for handing to host glue.
    pub fn sender(&self) -> Sender<String> {
        self.sender.clone()
    }

    /// Drains every queued payload into `notifier`, in arrival order.
    ///
    /// Returns the number of payloads handed to
    /// [`KeyboardNotifier::ingest`]. Malformed payloads count too; ingest
    /// absorbs them, so the queue always ends up empty.
    pub fn pump(&self, notifier: &KeyboardNotifier) -> usize {
        let mut forwarded = 0;
        while let Some(payload) = self.try_pop() {
            notifier.ingest(&payload);
            forwarded += 1;
        }
        forwarded
    }
}

impl PayloadFeed for HostFeed {
    fn push(&self, payload: String) {
        self.push(payload);
    }

    fn try_pop(&self) -> Option<String> {
        self.try_pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn payloads_pop_in_arrival_order() {
        let feed = HostFeed::new();
        feed.push("120");
        feed.push("0");

        assert_eq!(feed.try_pop().as_deref(), Some("120"));
        assert_eq!(feed.try_pop().as_deref(), Some("0"));
        assert_eq!(feed.try_pop(), None);
    }

    #[test]
    fn sender_feeds_from_another_thread() {
        let feed = HostFeed::new();
        let producer = feed.sender();

        thread::spawn(move || {
            let _ = producer.send("256".to_owned());
        })
        .join()
        .unwrap();

        assert_eq!(feed.try_pop().as_deref(), Some("256"));
    }

    #[test]
    fn pump_forwards_everything_including_malformed() {
        let feed = HostFeed::new();
        let notifier = KeyboardNotifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in = Arc::clone(&seen);
        notifier.register(move |state| {
            seen_in
                .lock()
                .unwrap()
                .push((state.visible(), state.height()));
        });

        for payload in ["96", "junk", "-3", "512"] {
            feed.push(payload);
        }

        assert_eq!(feed.pump(&notifier), 4);
        assert_eq!(feed.try_pop(), None);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(true, 96), (false, 0), (true, 512)]
        );
    }

    #[test]
    fn feed_trait_object_round_trips() {
        let feed: Box<dyn PayloadFeed> = Box::new(HostFeed::new());
        feed.push("48".to_owned());
        assert_eq!(feed.try_pop().as_deref(), Some("48"));
        assert_eq!(feed.try_pop(), None);
    }
}
