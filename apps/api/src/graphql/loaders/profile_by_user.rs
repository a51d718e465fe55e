//! Profile-by-User DataLoader for batched fetching
//!
//! A user owns at most one profile, so this is a plain one-to-one loader
//! keyed by `user_id`. Users without a profile resolve to `None`.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::dataloader::Loader;
use crate::models::Profile;
use crate::store::{Store, StoreError};

/// Bulk fetch of profiles by owning user
#[derive(Clone)]
pub struct ProfileByUserLoader {
    store: Arc<dyn Store>,
}

impl ProfileByUserLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for ProfileByUserLoader {
    type Value = Profile;
    type Error = StoreError;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let profiles = self.store.find_profiles_by_user_ids(keys).await?;

        Ok(profiles.into_iter().map(|p| (p.user_id, p)).collect())
    }
}
