//! Event bus shared by all actors of a system.

use tokio::sync::broadcast;

use crate::actor_system::system::SystemEvent;

pub type EventReceiver<E> = broadcast::Receiver<E>;

/// Broadcasts system events to every subscriber. Publishing without any
/// subscriber is not an error, the event is simply lost.
#[derive(Clone, Debug)]
pub struct EventBus<E: SystemEvent> {
    sender: broadcast::Sender<E>,
}

impl<E: SystemEvent> EventBus<E> {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        EventBus { sender }
    }

    pub fn publish(&self, event: E) {
        if self.sender.send(event).is_err() {
            log::trace!("No subscribers for published event");
        }
    }

    pub fn subscribe(&self) -> EventReceiver<E> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Ping(u8);

    impl SystemEvent for Ping {}

    #[test]
    fn test_publish_reaches_subscriber() {
        let bus = EventBus::new(4);
        let mut events = bus.subscribe();

        bus.publish(Ping(1));
        bus.publish(Ping(2));

        assert_eq!(events.try_recv().ok(), Some(Ping(1)));
        assert_eq!(events.try_recv().ok(), Some(Ping(2)));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(0);
        bus.publish(Ping(7));

        let mut late = bus.subscribe();
        assert!(late.try_recv().is_err());
    }
}
