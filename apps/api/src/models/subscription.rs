//! Follow edges between users

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Directed "subscriber follows author" edge from the subscriptions table.
///
/// At most one edge exists per ordered pair; following is not symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow, Serialize, Deserialize)]
pub struct SubscriptionEdge {
    pub subscriber_id: Uuid,
    pub author_id: Uuid,
}

impl SubscriptionEdge {
    pub fn new(subscriber_id: Uuid, author_id: Uuid) -> Self {
        Self {
            subscriber_id,
            author_id,
        }
    }

    /// Whether `user_id` is either endpoint of the edge
    pub fn touches(&self, user_id: Uuid) -> bool {
        self.subscriber_id == user_id || self.author_id == user_id
    }
}

impl std::fmt::Display for SubscriptionEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.subscriber_id, self.author_id)
    }
}
