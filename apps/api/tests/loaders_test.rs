//! Integration tests for the loader registry over the in-memory store

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;

use common::*;
use kinship_api::dataloader::LoadError;
use kinship_api::graphql::LoaderRegistry;
use kinship_api::models::MemberTypeId;
use kinship_api::store::{MemoryStore, Store, StoreError};
use kinship_shared_config::LoaderConfig;

fn registry(store: Arc<dyn Store>) -> LoaderRegistry {
    LoaderRegistry::new(store, LoaderConfig::default())
}

#[test_log::test(tokio::test)]
async fn test_concurrent_user_loads_share_one_call() {
    let store = Arc::new(MemoryStore::new());
    let ada = seed_user(store.as_ref(), "Ada").await;
    let bob = seed_user(store.as_ref(), "Bob").await;
    store.reset_calls();
    let loaders = registry(store.clone());

    let (a, b, again) = tokio::join!(
        loaders.users.load(ada.id),
        loaders.users.load(bob.id),
        loaders.users.load(ada.id),
    );

    assert_eq!(a.unwrap().unwrap().name, "Ada");
    assert_eq!(b.unwrap().unwrap().name, "Bob");
    assert_eq!(again.unwrap().unwrap().name, "Ada");
    assert_eq!(store.calls("find_users_by_ids"), 1);
}

#[tokio::test]
async fn test_load_many_keeps_order_and_misses() {
    let store = Arc::new(MemoryStore::new());
    let ada = seed_user(store.as_ref(), "Ada").await;
    let bob = seed_user(store.as_ref(), "Bob").await;
    let loaders = registry(store.clone());

    let users = loaders
        .users
        .load_many([bob.id, uuid::Uuid::new_v4(), ada.id])
        .await
        .unwrap();

    let names: Vec<Option<&str>> = users
        .iter()
        .map(|user| user.as_deref().map(|user| user.name.as_str()))
        .collect();
    assert_eq!(names, vec![Some("Bob"), None, Some("Ada")]);
}

#[tokio::test]
async fn test_author_without_posts_gets_empty_list() {
    let store = Arc::new(MemoryStore::new());
    let ada = seed_user(store.as_ref(), "Ada").await;
    let bob = seed_user(store.as_ref(), "Bob").await;
    seed_post(store.as_ref(), &ada, "one").await;
    seed_post(store.as_ref(), &ada, "two").await;
    store.reset_calls();
    let loaders = registry(store.clone());

    let (ada_posts, bob_posts) = tokio::join!(
        loaders.posts_by_author.load_group(ada.id),
        loaders.posts_by_author.load_group(bob.id),
    );

    let titles: Vec<&str> = ada_posts
        .as_ref()
        .unwrap()
        .iter()
        .map(|post| post.title.as_str())
        .collect();
    assert_eq!(titles, vec!["one", "two"]);
    assert!(bob_posts.unwrap().is_empty());
    assert_eq!(store.calls("find_posts_by_author_ids"), 1);
}

#[tokio::test]
async fn test_profile_by_user_and_member_type() {
    let store = Arc::new(MemoryStore::new());
    let ada = seed_user(store.as_ref(), "Ada").await;
    let bob = seed_user(store.as_ref(), "Bob").await;
    let profile = seed_profile(store.as_ref(), &ada, MemberTypeId::Business).await;
    let loaders = registry(store.clone());

    let (found, missing) = tokio::join!(
        loaders.profile_by_user.load(ada.id),
        loaders.profile_by_user.load(bob.id),
    );

    let found = found.unwrap().unwrap();
    assert_eq!(found.id, profile.id);
    assert!(missing.unwrap().is_none());

    let member_type = loaders
        .member_types
        .load(found.member_type_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member_type.posts_limit_per_month, 100);
}

#[tokio::test]
async fn test_follow_edges_resolve_both_directions() {
    let store = Arc::new(MemoryStore::new());
    let ada = seed_user(store.as_ref(), "Ada").await;
    let bob = seed_user(store.as_ref(), "Bob").await;
    let cyd = seed_user(store.as_ref(), "Cyd").await;
    seed_follow(store.as_ref(), &ada, &bob).await;
    seed_follow(store.as_ref(), &cyd, &bob).await;
    let loaders = registry(store.clone());

    let (following, followers) = tokio::join!(
        loaders.following.load_group(ada.id),
        loaders.followers.load_group(bob.id),
    );

    assert_eq!(*following.unwrap(), vec![bob.id]);
    let mut followers = followers.unwrap().to_vec();
    followers.sort();
    let mut expected = vec![ada.id, cyd.id];
    expected.sort();
    assert_eq!(followers, expected);
}

#[test_log::test(tokio::test)]
async fn test_fetch_error_is_not_cached() {
    let store = Arc::new(FailingPostsStore::new());
    let ada = seed_user(&store.inner, "Ada").await;
    let loaders = registry(store.clone());

    let first = loaders.posts_by_author.load_group(ada.id).await;
    assert_matches!(first, Err(LoadError::Fetch(err)) if matches!(*err, StoreError::Database(_)));
    assert!(!loaders.posts_by_author.is_cached(&ada.id));

    // The retry reaches the store again instead of replaying the failure
    let second = loaders.posts_by_author.load_group(ada.id).await;
    assert_matches!(second, Err(LoadError::Fetch(_)));

    // Unrelated loaders keep working
    let user = loaders.users.load(ada.id).await.unwrap();
    assert!(user.is_some());
}

#[tokio::test]
async fn test_invalidation_refetches_after_write() {
    let store = Arc::new(MemoryStore::new());
    let ada = seed_user(store.as_ref(), "Ada").await;
    let loaders = registry(store.clone());

    assert!(loaders
        .posts_by_author
        .load_group(ada.id)
        .await
        .unwrap()
        .is_empty());

    let post = seed_post(store.as_ref(), &ada, "fresh").await;

    // Still the cached empty list until the write is reported
    assert!(loaders
        .posts_by_author
        .load_group(ada.id)
        .await
        .unwrap()
        .is_empty());

    loaders.post_written(&post);
    let posts = loaders.posts_by_author.load_group(ada.id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, post.id);
}
