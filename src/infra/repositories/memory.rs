//! In-memory storage backend.
//!
//! Users live in a single map keyed by identifier; friendship is an
//! identifier-based adjacency stored on each user record, so the graph has
//! no ownership cycles. Every operation takes the lock once for its whole
//! check-then-mutate sequence.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::user_repository::UserRepository;
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Process-local user store.
///
/// The identifier sequence is owned by the instance: independent stores
/// allocate independent sequences. Nothing is persisted across restarts,
/// and identifiers are not unique across multiple service instances.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: User) -> AppResult<()> {
        let id = user.id.clone();
        self.users.write().await.insert(id.clone(), user);
        tracing::debug!("user created with id {}", id);
        Ok(())
    }

    async fn make_id(&self) -> AppResult<String> {
        let next = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(next.to_string())
    }

    async fn make_friends(&self, source_id: &str, target_id: &str) -> AppResult<String> {
        if source_id == target_id {
            return Err(AppError::validation(format!(
                "user {} cannot befriend itself",
                source_id
            )));
        }

        let mut users = self.users.write().await;

        let (source_name, target_name) = match (users.get(source_id), users.get(target_id)) {
            (Some(source), Some(target)) => {
                // Membership is checked by identifier, never by record identity
                if source.is_friend(target_id) {
                    return Err(AppError::AlreadyFriends(
                        source_id.to_string(),
                        target_id.to_string(),
                    ));
                }
                (source.name.clone(), target.name.clone())
            }
            (None, None) => {
                return Err(AppError::UsersNotFound(
                    source_id.to_string(),
                    target_id.to_string(),
                ))
            }
            (None, Some(_)) => return Err(AppError::not_found(source_id)),
            (Some(_), None) => return Err(AppError::not_found(target_id)),
        };

        if let Some(source) = users.get_mut(source_id) {
            source.friends.push(target_id.to_string());
        }
        if let Some(target) = users.get_mut(target_id) {
            target.friends.push(source_id.to_string());
        }

        tracing::debug!("linked users {} and {}", source_id, target_id);
        Ok(format!("{} and {} are now friends", source_name, target_name))
    }

    async fn delete(&self, id: &str) -> AppResult<String> {
        let mut users = self.users.write().await;

        let removed = users.remove(id).ok_or_else(|| AppError::not_found(id))?;

        // Cascade: drop the deleted identifier from every peer's list
        for friend_id in &removed.friends {
            if let Some(peer) = users.get_mut(friend_id) {
                peer.friends.retain(|f| f != id);
            }
        }

        tracing::debug!("deleted user {}", id);
        Ok(format!("user {} deleted", removed.name))
    }

    async fn find_friends(&self, id: &str) -> AppResult<Vec<User>> {
        let users = self.users.read().await;

        let user = users.get(id).ok_or_else(|| AppError::not_found(id))?;

        let friends = user
            .friends
            .iter()
            .filter_map(|friend_id| users.get(friend_id).cloned())
            .collect();

        tracing::debug!("listed friends of user {}", id);
        Ok(friends)
    }

    async fn update_age(&self, id: &str, age: &str) -> AppResult<()> {
        let mut users = self.users.write().await;

        let user = users.get_mut(id).ok_or_else(|| AppError::not_found(id))?;
        user.age = age.to_string();

        tracing::debug!("updated age of user {}", id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_users(users: &[(&str, &str, &str)]) -> MemoryStore {
        let store = MemoryStore::new();
        for (id, name, age) in users {
            store.create(User::new(*id, *name, *age)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn make_id_starts_at_one_and_increments() {
        let store = MemoryStore::new();
        assert_eq!(store.make_id().await.unwrap(), "1");
        assert_eq!(store.make_id().await.unwrap(), "2");
    }

    #[tokio::test]
    async fn sequences_are_per_instance() {
        let first = MemoryStore::new();
        let second = MemoryStore::new();
        first.make_id().await.unwrap();
        first.make_id().await.unwrap();
        assert_eq!(second.make_id().await.unwrap(), "1");
    }

    #[tokio::test]
    async fn make_friends_is_symmetric() {
        let store = store_with_users(&[("1", "Helen", "18"), ("2", "Bob", "20")]).await;

        let message = store.make_friends("1", "2").await.unwrap();
        assert_eq!(message, "Helen and Bob are now friends");

        let friends_of_1 = store.find_friends("1").await.unwrap();
        let friends_of_2 = store.find_friends("2").await.unwrap();
        assert_eq!(friends_of_1.len(), 1);
        assert_eq!(friends_of_1[0].name, "Bob");
        assert_eq!(friends_of_2.len(), 1);
        assert_eq!(friends_of_2[0].name, "Helen");
    }

    #[tokio::test]
    async fn make_friends_twice_fails_with_already_friends() {
        let store = store_with_users(&[("1", "Helen", "18"), ("2", "Bob", "20")]).await;

        store.make_friends("1", "2").await.unwrap();
        let err = store.make_friends("1", "2").await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyFriends(_, _)));

        // Order of arguments must not matter either
        let err = store.make_friends("2", "1").await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyFriends(_, _)));
    }

    #[tokio::test]
    async fn make_friends_names_the_missing_id() {
        let store = store_with_users(&[("1", "Helen", "18")]).await;

        let err = store.make_friends("1", "9").await.unwrap_err();
        assert_eq!(err.to_string(), "user 9 not found");

        let err = store.make_friends("9", "1").await.unwrap_err();
        assert_eq!(err.to_string(), "user 9 not found");
    }

    #[tokio::test]
    async fn make_friends_names_both_missing_ids() {
        let store = MemoryStore::new();
        let err = store.make_friends("8", "9").await.unwrap_err();
        assert_eq!(err.to_string(), "users 8 and 9 not found");
    }

    #[tokio::test]
    async fn make_friends_rejects_self_link() {
        let store = store_with_users(&[("1", "Helen", "18")]).await;
        let err = store.make_friends("1", "1").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_cascades_out_of_peer_lists() {
        let store =
            store_with_users(&[("1", "Helen", "18"), ("2", "Bob", "20"), ("3", "Ann", "30")])
                .await;
        store.make_friends("1", "2").await.unwrap();
        store.make_friends("2", "3").await.unwrap();

        let message = store.delete("2").await.unwrap();
        assert_eq!(message, "user Bob deleted");

        assert!(store.find_friends("1").await.unwrap().is_empty());
        assert!(store.find_friends("3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_user_leaves_store_unchanged() {
        let store = store_with_users(&[("1", "Helen", "18"), ("2", "Bob", "20")]).await;
        store.make_friends("1", "2").await.unwrap();

        let err = store.delete("9").await.unwrap_err();
        assert_eq!(err.to_string(), "user 9 not found");

        let friends = store.find_friends("1").await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].id, "2");
    }

    #[tokio::test]
    async fn deleted_user_cannot_be_deleted_again() {
        let store = store_with_users(&[("1", "Helen", "18")]).await;
        store.delete("1").await.unwrap();
        assert!(store.delete("1").await.is_err());
    }

    #[tokio::test]
    async fn update_age_is_verbatim_and_keeps_friends() {
        let store = store_with_users(&[("1", "Helen", "18"), ("2", "Bob", "20")]).await;
        store.make_friends("1", "2").await.unwrap();

        store.update_age("1", "30").await.unwrap();

        let friends_of_2 = store.find_friends("2").await.unwrap();
        assert_eq!(friends_of_2[0].age, "30");
        assert_eq!(friends_of_2[0].friends, vec!["2".to_string()]);
    }

    #[tokio::test]
    async fn update_age_of_missing_user_fails() {
        let store = MemoryStore::new();
        let err = store.update_age("9", "30").await.unwrap_err();
        assert_eq!(err.to_string(), "user 9 not found");
    }

    #[tokio::test]
    async fn find_friends_of_missing_user_fails() {
        let store = MemoryStore::new();
        assert!(store.find_friends("9").await.is_err());
    }

    #[tokio::test]
    async fn create_then_friend_then_delete_scenario() {
        let store = MemoryStore::new();

        let id = store.make_id().await.unwrap();
        assert_eq!(id, "1");
        store.create(User::new(id, "Helen", "18")).await.unwrap();

        let id = store.make_id().await.unwrap();
        assert_eq!(id, "2");
        store.create(User::new(id, "Bob", "20")).await.unwrap();

        let message = store.make_friends("1", "2").await.unwrap();
        assert!(message.contains("Helen"));
        assert!(message.contains("Bob"));

        let friends = store.find_friends("1").await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].name, "Bob");

        store.delete("2").await.unwrap();
        assert!(store.find_friends("1").await.unwrap().is_empty());
    }
}
