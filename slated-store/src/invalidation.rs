use tokio::sync::broadcast;
use tracing::debug;

use slated_shared::models::events::InvalidationEvent;

/// In-process invalidation fanout. Every appointment mutation publishes
/// here so cached query scopes are refetched rather than served stale.
#[derive(Clone)]
pub struct InvalidationBus {
    tx: broadcast::Sender<InvalidationEvent>,
}

impl InvalidationBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InvalidationEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: InvalidationEvent) {
        debug!(
            "Invalidation: {:?} {} stales {} scopes",
            event.kind,
            event.appointment_id,
            event.stale_scopes().len()
        );
        // Send only fails when there are no subscribers yet.
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slated_shared::models::events::{MutationKind, QueryScope};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_subscribers_see_mutations() {
        let bus = InvalidationBus::new(16);
        let mut rx = bus.subscribe();

        let id = Uuid::new_v4();
        bus.publish(InvalidationEvent::new(id, MutationKind::Deleted));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.appointment_id, id);
        assert_eq!(event.kind, MutationKind::Deleted);
        assert!(event.stale_scopes().contains(&QueryScope::DashboardSummary));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let bus = InvalidationBus::new(16);
        bus.publish(InvalidationEvent::new(Uuid::new_v4(), MutationKind::Created));
    }
}
