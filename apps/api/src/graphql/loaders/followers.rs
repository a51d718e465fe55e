//! Followers DataLoader
//!
//! Maps an author to the ids of the users subscribed to them. Only edges
//! are fetched here; resolving the ids to users goes through the user loader.

use std::sync::Arc;

use uuid::Uuid;

use crate::dataloader::GroupedLoader;
use crate::store::{Store, StoreError};

/// Bulk fetch of subscriber ids grouped by author
#[derive(Clone)]
pub struct FollowersLoader {
    store: Arc<dyn Store>,
}

impl FollowersLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl GroupedLoader<Uuid> for FollowersLoader {
    type Item = Uuid;
    type Error = StoreError;

    async fn load_rows(&self, keys: &[Uuid]) -> Result<Vec<(Uuid, Uuid)>, StoreError> {
        let edges = self.store.find_subscriptions_by_author_ids(keys).await?;

        Ok(edges
            .into_iter()
            .map(|edge| (edge.author_id, edge.subscriber_id))
            .collect())
    }
}
