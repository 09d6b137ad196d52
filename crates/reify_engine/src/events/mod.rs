//! Event publishing
//!
//! Broadcast streams used by the scene (resize), the collision detector
//! (collision pairs) and the input manager (key events).
//!
//! Delivery is immediate: [`EventPublisher::publish`] invokes every
//! subscriber in registration order and returns only after the last one has
//! run. There is no queue and no consumption; every current subscriber sees
//! every event.

/// Handle returned by [`EventPublisher::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Raw numeric value
    pub fn value(self) -> u64 {
        self.0
    }
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Ordered list of subscriber callbacks for events of type `E`
pub struct EventPublisher<E> {
    handlers: Vec<(SubscriptionId, Handler<E>)>,
    next_id: u64,
}

impl<E> EventPublisher<E> {
    /// Create a publisher with no subscribers
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a callback; it will see every event published from now on
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a callback. Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Deliver an event to every subscriber in registration order
    pub fn publish(&mut self, event: &E) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Drop every subscription
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<E> Default for EventPublisher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EventPublisher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPublisher")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
