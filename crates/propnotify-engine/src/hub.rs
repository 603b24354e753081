//! Per-instance change hub: the "subscribe by property name" surface.
//!
//! The hub holds subscriber callbacks as `Weak` references; each
//! [`Subscription`] RAII guard owns the strong reference, so dropping the
//! guard unsubscribes. Dead entries are swept lazily during publish.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. Dropping a [`Subscription`] removes the callback before the next
//!    publish reaches it.
//! 3. Publishing collects live callbacks first and invokes them outside
//!    the internal borrow, so a callback may subscribe or drop
//!    subscriptions without panicking.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback = dyn Fn(&str);

/// Subscriber registry for one notifying instance.
#[derive(Default)]
pub struct ChangeHub {
    subscribers: RefCell<Vec<Weak<Callback>>>,
}

/// RAII guard for one subscriber; dropping it unsubscribes.
#[must_use = "dropping the subscription immediately unsubscribes"]
pub struct Subscription {
    _callback: Rc<Callback>,
}

impl ChangeHub {
    /// An empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked with the changed property's name.
    pub fn subscribe(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        let callback: Rc<Callback> = Rc::new(callback);
        self.subscribers.borrow_mut().push(Rc::downgrade(&callback));
        Subscription {
            _callback: callback,
        }
    }

    /// Publish a change under `property` to every live subscriber.
    pub fn publish(&self, property: &str) {
        let live: Vec<Rc<Callback>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in live {
            callback(property);
        }
    }

    /// Number of live subscribers (sweeps dead entries).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|weak| weak.strong_count() > 0);
        subscribers.len()
    }
}

impl std::fmt::Debug for ChangeHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
