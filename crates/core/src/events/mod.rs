//! Change notifications published after committed mutations.
//!
//! Dependent queries (the summary, account lists, history charts) go stale
//! whenever a mutation commits. Instead of an ambient refresh counter, the
//! hub broadcasts an explicit event per commit; subscribers re-run their
//! queries when an event for the right domain arrives. Lagged subscribers
//! miss events rather than block publishers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Data domain a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataDomain {
    /// Account records or balances.
    Accounts,
    /// Expense records.
    Expenses,
    /// Income records.
    Incomes,
    /// Savings goals.
    Goals,
    /// Budget split preferences.
    Preferences,
}

/// A committed mutation, scoped to one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Owner of the mutated data.
    pub user_id: Uuid,
    /// Domain that changed.
    pub domain: DataDomain,
}

/// Broadcast hub for change events.
#[derive(Debug, Clone)]
pub struct ChangeHub {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeHub {
    /// Creates a hub retaining up to `capacity` undelivered events per
    /// subscriber before older ones are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes a change event. Returns the number of live subscribers;
    /// publishing with no subscribers is not an error.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribes to future change events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let hub = ChangeHub::new(8);
        let mut rx = hub.subscribe();

        let event = ChangeEvent {
            user_id: Uuid::new_v4(),
            domain: DataDomain::Expenses,
        };
        assert_eq!(hub.publish(event), 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let hub = ChangeHub::new(8);
        let event = ChangeEvent {
            user_id: Uuid::new_v4(),
            domain: DataDomain::Preferences,
        };
        assert_eq!(hub.publish(event), 0);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_all_notified() {
        let hub = ChangeHub::new(8);
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        let event = ChangeEvent {
            user_id: Uuid::new_v4(),
            domain: DataDomain::Accounts,
        };
        assert_eq!(hub.publish(event), 2);
        assert_eq!(rx1.recv().await.unwrap(), event);
        assert_eq!(rx2.recv().await.unwrap(), event);
    }
}
