//! # chase_event - Event channels and dispatch
//!
//! The game core publishes what happened (level changed, item collected,
//! game over, game complete) and never calls into the presentation layer.
//! HUDs, audio hooks and score submission subscribe here instead.
//!
//! - [`EventChannel`]: a queue of one event type, drained by the owner
//! - [`EventBus`]: typed publish/subscribe with priority-ordered handlers

use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, VecDeque};

/// Handler priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Low = 0,
    #[default]
    Normal = 1,
    High = 2,
}

/// Trait for events
pub trait Event: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Event for T {}

type DynamicHandler = Box<dyn FnMut(&dyn Any) + Send>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

struct Envelope {
    type_id: TypeId,
    data: Box<dyn Any + Send + Sync>,
}

/// Event bus for publishing and subscribing to events
///
/// Publishing only enqueues. Handlers run in [`EventBus::process`], in
/// publish order; for one event, higher-priority handlers run first.
pub struct EventBus {
    queue: Mutex<VecDeque<Envelope>>,
    handlers: BTreeMap<TypeId, Vec<(SubscriberId, Priority, DynamicHandler)>>,
    next_subscriber_id: u64,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            handlers: BTreeMap::new(),
            next_subscriber_id: 1,
        }
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        self.queue.lock().push_back(Envelope {
            type_id: TypeId::of::<E>(),
            data: Box::new(event),
        });
    }

    /// Subscribe to an event type
    pub fn subscribe<E: Event, F>(&mut self, handler: F) -> SubscriberId
    where
        F: FnMut(&E) + Send + 'static,
    {
        self.subscribe_with_priority(handler, Priority::Normal)
    }

    /// Subscribe with priority
    pub fn subscribe_with_priority<E: Event, F>(&mut self, mut handler: F, priority: Priority) -> SubscriberId
    where
        F: FnMut(&E) + Send + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;

        let wrapped: DynamicHandler = Box::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                handler(event);
            }
        });

        let handlers = self.handlers.entry(TypeId::of::<E>()).or_default();
        handlers.push((id, priority, wrapped));
        // Stable: equal priorities keep subscription order
        handlers.sort_by(|a, b| b.1.cmp(&a.1));

        id
    }

    /// Unsubscribe
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        for handlers in self.handlers.values_mut() {
            handlers.retain(|(sub_id, _, _)| *sub_id != id);
        }
    }

    /// Dispatch all pending events; returns how many were dispatched
    pub fn process(&mut self) -> usize {
        let events: Vec<Envelope> = self.queue.lock().drain(..).collect();
        let count = events.len();

        for envelope in events {
            match self.handlers.get_mut(&envelope.type_id) {
                Some(handlers) => {
                    for (_, _, handler) in handlers.iter_mut() {
                        handler(envelope.data.as_ref());
                    }
                }
                None => log::trace!("Event with no subscribers dropped"),
            }
        }

        count
    }

    /// Get pending event count
    pub fn pending_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Check if there are pending events
    pub fn has_pending(&self) -> bool {
        !self.queue.lock().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Channel for single-type events
pub struct EventChannel<E: Event> {
    queue: Mutex<VecDeque<E>>,
}

impl<E: Event> EventChannel<E> {
    /// Create a new channel
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Send an event
    pub fn send(&self, event: E) {
        self.queue.lock().push_back(event);
    }

    /// Drain all events, oldest first
    pub fn drain(&self) -> Vec<E> {
        self.queue.lock().drain(..).collect()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Get pending count
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }
}

impl<E: Event> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{Event, EventBus, EventChannel, Priority, SubscriberId};
}
