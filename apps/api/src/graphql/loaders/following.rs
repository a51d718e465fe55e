//! Following DataLoader
//!
//! Maps a subscriber to the ids of the authors they follow.

use std::sync::Arc;

use uuid::Uuid;

use crate::dataloader::GroupedLoader;
use crate::store::{Store, StoreError};

/// Bulk fetch of author ids grouped by subscriber
#[derive(Clone)]
pub struct FollowingLoader {
    store: Arc<dyn Store>,
}

impl FollowingLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl GroupedLoader<Uuid> for FollowingLoader {
    type Item = Uuid;
    type Error = StoreError;

    async fn load_rows(&self, keys: &[Uuid]) -> Result<Vec<(Uuid, Uuid)>, StoreError> {
        let edges = self.store.find_subscriptions_by_subscriber_ids(keys).await?;

        Ok(edges
            .into_iter()
            .map(|edge| (edge.subscriber_id, edge.author_id))
            .collect())
    }
}
