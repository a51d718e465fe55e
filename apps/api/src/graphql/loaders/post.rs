//! Post loader keyed by post id

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::dataloader::Loader;
use crate::models::Post;
use crate::store::{Store, StoreError};

#[derive(Clone)]
pub struct PostLoader {
    store: Arc<dyn Store>,
}

impl PostLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for PostLoader {
    type Value = Post;
    type Error = StoreError;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let posts = self.store.find_posts_by_ids(keys).await?;

        Ok(posts.into_iter().map(|p| (p.id, p)).collect())
    }
}
