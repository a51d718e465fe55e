//! One-to-many loading
//!
//! A [`GroupedLoader`] returns flat `(key, item)` rows; wrapping it in
//! [`Grouped`] turns it into a [`Loader`] whose value for every requested key
//! is a `Vec` of that key's items, empty when nothing matched.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use super::{BatchLoader, LoadError, Loader, LoaderKey};

/// Bulk fetch of rows keyed by a foreign key
pub trait GroupedLoader<K: LoaderKey>: Send + Sync + 'static {
    /// Row type collected under each key
    type Item: Send + Sync + 'static;

    /// Error raised by the underlying store
    type Error: Send + Sync + 'static;

    /// Fetch every row belonging to any of `keys`, in the order the store returns them
    fn load_rows(
        &self,
        keys: &[K],
    ) -> impl Future<Output = Result<Vec<(K, Self::Item)>, Self::Error>> + Send;
}

/// Adapter turning a [`GroupedLoader`] into a list-valued [`Loader`]
pub struct Grouped<G>(G);

impl<G> Grouped<G> {
    pub fn new(inner: G) -> Self {
        Self(inner)
    }
}

impl<K: LoaderKey, G: GroupedLoader<K>> Loader<K> for Grouped<G> {
    type Value = Vec<G::Item>;
    type Error = G::Error;

    async fn load(&self, keys: &[K]) -> Result<HashMap<K, Self::Value>, Self::Error> {
        let rows = self.0.load_rows(keys).await?;

        // Every requested key gets an entry, even with zero matching rows
        let mut groups: HashMap<K, Vec<G::Item>> =
            keys.iter().map(|key| (key.clone(), Vec::new())).collect();

        for (key, item) in rows {
            if let Some(group) = groups.get_mut(&key) {
                group.push(item);
            }
        }

        Ok(groups)
    }
}

impl<K: LoaderKey, G: GroupedLoader<K>> BatchLoader<K, Grouped<G>> {
    /// Load the group for `key`; a key with no rows yields an empty `Vec`
    pub async fn load_group(&self, key: K) -> Result<Arc<Vec<G::Item>>, LoadError<G::Error>> {
        Ok(self.load(key).await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Parent `n` owns the children `n * 10 + 1 ..= n * 10 + n`
    #[derive(Clone, Default)]
    struct Children {
        calls: Arc<Mutex<usize>>,
    }

    impl GroupedLoader<u32> for Children {
        type Item = u32;
        type Error = String;

        async fn load_rows(&self, keys: &[u32]) -> Result<Vec<(u32, u32)>, String> {
            *self.calls.lock().unwrap() += 1;
            Ok(keys
                .iter()
                .flat_map(|parent| (1..=*parent).map(move |i| (*parent, parent * 10 + i)))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_group_without_rows_is_empty() {
        let loader = BatchLoader::new("children", Grouped::new(Children::default()));

        let children = loader.load_group(0).await.unwrap();

        assert!(children.is_empty());
        assert!(loader.load(0).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_groups_keep_row_order_and_batch_once() {
        let inner = Children::default();
        let loader = BatchLoader::new("children", Grouped::new(inner.clone()));

        let (two, three, none) = tokio::join!(
            loader.load_group(2),
            loader.load_group(3),
            loader.load_group(0)
        );

        assert_eq!(*two.unwrap(), vec![21, 22]);
        assert_eq!(*three.unwrap(), vec![31, 32, 33]);
        assert!(none.unwrap().is_empty());
        assert_eq!(*inner.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rows_for_unrequested_keys_are_ignored() {
        struct Noisy;

        impl GroupedLoader<u32> for Noisy {
            type Item = &'static str;
            type Error = String;

            async fn load_rows(&self, _keys: &[u32]) -> Result<Vec<(u32, &'static str)>, String> {
                Ok(vec![(1, "mine"), (99, "stray")])
            }
        }

        let loader = BatchLoader::new("noisy", Grouped::new(Noisy));

        assert_eq!(*loader.load_group(1).await.unwrap(), vec!["mine"]);
        assert!(!loader.is_cached(&99));
    }
}
