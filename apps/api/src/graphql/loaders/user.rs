//! User DataLoader for batched fetching
//!
//! Batches user id lookups from post authors, profile owners and both
//! directions of the follow graph into one `find_users_by_ids` call per tick.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::dataloader::Loader;
use crate::models::User;
use crate::store::{Store, StoreError};

/// Bulk fetch of users by id
#[derive(Clone)]
pub struct UserLoader {
    store: Arc<dyn Store>,
}

impl UserLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for UserLoader {
    type Value = User;
    type Error = StoreError;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let users = self.store.find_users_by_ids(keys).await?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
