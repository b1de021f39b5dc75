//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`SiteEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` between the record store, the
//! settings store and anything that wants to react to their changes.
//! Subscribing registers a listener; dropping the receiver unregisters it.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use crate::event::{SiteEvent, Topic};

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use envoy_events::{Change, EventBus, SiteEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(SiteEvent::Navigation(Change::Deleted(4)));
/// assert_eq!(rx.try_recv().unwrap().name(), "navigation-deleted");
/// ```
pub struct EventBus {
    sender: broadcast::Sender<SiteEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: SiteEvent) {
        tracing::trace!(event = %event.name(), "Publishing site event");
        // Ignore the SendError: it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.sender.subscribe()
    }

    /// Subscribe to events of a single topic.
    pub fn subscribe_topic(&self, topic: Topic) -> TopicReceiver {
        TopicReceiver {
            topic,
            inner: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// A subscription that skips events outside its [`Topic`].
pub struct TopicReceiver {
    topic: Topic,
    inner: broadcast::Receiver<SiteEvent>,
}

impl TopicReceiver {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Wait for the next event on this topic.
    pub async fn recv(&mut self) -> Result<SiteEvent, RecvError> {
        loop {
            let event = self.inner.recv().await?;
            if event.topic() == self.topic {
                return Ok(event);
            }
        }
    }

    /// Take the next already-published event on this topic, if any.
    pub fn try_recv(&mut self) -> Result<SiteEvent, TryRecvError> {
        loop {
            let event = self.inner.try_recv()?;
            if event.topic() == self.topic {
                return Ok(event);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Change;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(SiteEvent::setting_saved("hero"));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.topic(), Topic::Settings);
        assert_eq!(received.name(), "settings-saved");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(SiteEvent::Content(Change::Deleted(5)));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1, e2);
        assert_eq!(e1.name(), "content-deleted");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        // No subscribers: this must not panic.
        bus.publish(SiteEvent::Contact(Change::Deleted(1)));
    }

    #[test]
    fn dropping_receiver_removes_listener() {
        let bus = EventBus::default();
        let rx = bus.subscribe();
        let topic_rx = bus.subscribe_topic(Topic::Users);
        assert_eq!(bus.listener_count(), 2);

        drop(rx);
        drop(topic_rx);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn topic_receiver_skips_other_topics() {
        let bus = EventBus::default();
        let mut nav = bus.subscribe_topic(Topic::Navigation);

        bus.publish(SiteEvent::Content(Change::Deleted(1)));
        bus.publish(SiteEvent::Navigation(Change::Deleted(2)));
        bus.publish(SiteEvent::User(Change::Deleted(3)));

        let event = nav.try_recv().expect("navigation event should be queued");
        assert_eq!(event, SiteEvent::Navigation(Change::Deleted(2)));
        assert!(matches!(nav.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn events_arrive_in_publish_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        for id in 1..=3 {
            bus.publish(SiteEvent::Navigation(Change::Deleted(id)));
        }

        for id in 1..=3 {
            let event = rx.recv().await.unwrap();
            assert_eq!(event, SiteEvent::Navigation(Change::Deleted(id)));
        }
    }
}
