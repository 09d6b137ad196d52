//! Input event stream
//!
//! The platform layer forwards raw key transitions to an [`InputManager`],
//! which tracks the pressed set and republishes every transition to its
//! subscribers synchronously, in subscription order.

use crate::events::{EventPublisher, SubscriptionId};
use std::collections::HashSet;

/// Platform key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Space bar
    pub const SPACE: Self = Self(32);
    /// Escape
    pub const ESCAPE: Self = Self(256);
    /// Right arrow
    pub const RIGHT: Self = Self(262);
    /// Left arrow
    pub const LEFT: Self = Self(263);
    /// Down arrow
    pub const DOWN: Self = Self(264);
    /// Up arrow
    pub const UP: Self = Self(265);
}

/// A key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed
    KeyDown(KeyCode),
    /// Key released
    KeyUp(KeyCode),
}

/// Publishes key transitions and tracks which keys are held
#[derive(Debug, Default)]
pub struct InputManager {
    publisher: EventPublisher<InputEvent>,
    pressed: HashSet<KeyCode>,
}

impl InputManager {
    /// Create an input manager with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a key press
    pub fn key_down(&mut self, key: KeyCode) {
        log::debug!("Key down: {}", key.0);
        self.pressed.insert(key);
        self.publisher.publish(&InputEvent::KeyDown(key));
    }

    /// Report a key release
    pub fn key_up(&mut self, key: KeyCode) {
        log::debug!("Key up: {}", key.0);
        self.pressed.remove(&key);
        self.publisher.publish(&InputEvent::KeyUp(key));
    }

    /// Whether `key` is currently held
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Subscribe to key transitions
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.publisher.subscribe(handler)
    }

    /// Cancel a subscription
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }
}
