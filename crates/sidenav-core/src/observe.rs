//! Change notification: a [`Subject`] keeps a list of subscribers and posts a
//! stateless [`Msg::Changed`] to each of them.
//!
//! Notifications travel through the subscriber's message channel, so they
//! are handled on a later turn of the event loop and never while the
//! mutating call is still on the stack.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;

use crate::messages::Msg;

static NEXT_TOPIC: AtomicU64 = AtomicU64::new(1);

/// Identifies which subject a [`Msg::Changed`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Topic(u64);

impl Topic {
    /// A topic no other subject in this process uses.
    pub fn fresh() -> Self {
        Self(NEXT_TOPIC.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle returned by [`Subject::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An observer list.
#[derive(Debug)]
pub struct Subject {
    topic: Topic,
    listeners: Vec<(ListenerId, Sender<Msg>)>,
    next_id: u64,
}

impl Subject {
    pub fn new() -> Self {
        Self {
            topic: Topic::fresh(),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    #[inline]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Register `tx` and return a handle for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&mut self, tx: Sender<Msg>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, tx));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Post one [`Msg::Changed`] to every subscriber. Subscribers whose
    /// receiving end is gone are dropped.
    pub fn notify(&mut self) {
        let topic = self.topic;
        self.listeners.retain(|(id, tx)| {
            let alive = tx.send(Msg::changed(topic)).is_ok();
            if !alive {
                log::debug!("dropping disconnected listener {id:?} of {topic:?}");
            }
            alive
        });
    }
}

impl Default for Subject {
    fn default() -> Self {
        Self::new()
    }
}
