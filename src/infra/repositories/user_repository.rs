//! User repository contract shared by all storage backends.

use async_trait::async_trait;

use crate::domain::User;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Storage abstraction over users and their mutual friend links.
///
/// Backends implement the same contract: a process-local map
/// ([`super::MemoryStore`]) and a MongoDB collection
/// ([`super::MongoStore`]). The HTTP layer only ever sees this trait.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user whose identifier was already assigned via `make_id`.
    async fn create(&self, user: User) -> AppResult<()>;

    /// Produce a new unique identifier string.
    ///
    /// This is a read-then-compute allocation, not a store-managed atomic
    /// sequence: concurrent callers against the same document store can
    /// observe the same maximum.
    async fn make_id(&self) -> AppResult<String>;

    /// Link two users as friends, symmetrically.
    ///
    /// Fails if either identifier is unknown (naming the missing one, or
    /// both), if the pair is already linked, or if both identifiers name
    /// the same user. Returns a message naming both parties.
    async fn make_friends(&self, source_id: &str, target_id: &str) -> AppResult<String>;

    /// Delete a user and remove it from every peer's friend list.
    ///
    /// Returns a message naming the removed user.
    async fn delete(&self, id: &str) -> AppResult<String>;

    /// Return the full records of the user's listed friends.
    async fn find_friends(&self, id: &str) -> AppResult<Vec<User>>;

    /// Set the user's age verbatim. No effect on relationships.
    async fn update_age(&self, id: &str, age: &str) -> AppResult<()>;

    /// Probe the backing store, used by the health endpoint.
    async fn ping(&self) -> AppResult<()>;
}
