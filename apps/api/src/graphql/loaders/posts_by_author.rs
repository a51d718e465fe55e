//! Posts-by-Author DataLoader for batched fetching
//!
//! Loads the posts of many authors in one `find_posts_by_author_ids` call.
//! Authors without posts get an empty list rather than a miss.

use std::sync::Arc;

use uuid::Uuid;

use crate::dataloader::GroupedLoader;
use crate::models::Post;
use crate::store::{Store, StoreError};

/// Bulk fetch of posts grouped by author
#[derive(Clone)]
pub struct PostsByAuthorLoader {
    store: Arc<dyn Store>,
}

impl PostsByAuthorLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl GroupedLoader<Uuid> for PostsByAuthorLoader {
    type Item = Post;
    type Error = StoreError;

    async fn load_rows(&self, keys: &[Uuid]) -> Result<Vec<(Uuid, Post)>, StoreError> {
        let posts = self.store.find_posts_by_author_ids(keys).await?;

        Ok(posts.into_iter().map(|p| (p.author_id, p)).collect())
    }
}
