//! Profile loader keyed by profile id

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::dataloader::Loader;
use crate::models::Profile;
use crate::store::{Store, StoreError};

#[derive(Clone)]
pub struct ProfileLoader {
    store: Arc<dyn Store>,
}

impl ProfileLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for ProfileLoader {
    type Value = Profile;
    type Error = StoreError;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let profiles = self.store.find_profiles_by_ids(keys).await?;

        Ok(profiles.into_iter().map(|p| (p.id, p)).collect())
    }
}
