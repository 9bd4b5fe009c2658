//! MongoDB storage backend.
//!
//! One document per user, shaped `{id, name, age, friends}` with `friends`
//! holding peer identifiers. Multi-step mutations are not wrapped in a
//! transaction; each side of a link is written with `$addToSet` so a retry
//! cannot duplicate a pair, and the delete cascade runs before the record
//! delete so an interrupted delete never leaves dangling references.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;

use super::user_repository::UserRepository;
use crate::config::FIRST_USER_ID;
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::db::Database;

/// Document-store user repository over a MongoDB collection.
pub struct MongoStore {
    database: Database,
    collection: Collection<User>,
}

impl MongoStore {
    /// Create a repository over the named collection.
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            database: database.clone(),
            collection: database.users_collection(collection),
        }
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }
}

#[async_trait]
impl UserRepository for MongoStore {
    async fn create(&self, user: User) -> AppResult<()> {
        let id = user.id.clone();
        self.collection.insert_one(user).await?;
        tracing::debug!("user created with id {}", id);
        Ok(())
    }

    /// Read-then-compute allocation: take the numeric maximum of the stored
    /// identifiers, increment, return as a string. The comparison runs
    /// through `$toInt` because the `id` field is stored as a string and a
    /// lexicographic sort would rank "9" above "10".
    async fn make_id(&self) -> AppResult<String> {
        let pipeline = vec![
            doc! { "$project": { "value": { "$toInt": "$id" } } },
            doc! { "$sort": { "value": -1 } },
            doc! { "$limit": 1 },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;

        let Some(document) = cursor.try_next().await? else {
            return Ok(FIRST_USER_ID.to_string());
        };

        let current = document
            .get_i32("value")
            .map(i64::from)
            .or_else(|_| document.get_i64("value"))
            .map_err(|_| AppError::internal("unexpected document shape from id aggregation"))?;

        Ok((current + 1).to_string())
    }

    async fn make_friends(&self, source_id: &str, target_id: &str) -> AppResult<String> {
        if source_id == target_id {
            return Err(AppError::validation(format!(
                "user {} cannot befriend itself",
                source_id
            )));
        }

        let source = self.find_by_id(source_id).await?;
        let target = self.find_by_id(target_id).await?;
        let (source, target) = match (source, target) {
            (Some(source), Some(target)) => (source, target),
            (None, None) => {
                return Err(AppError::UsersNotFound(
                    source_id.to_string(),
                    target_id.to_string(),
                ))
            }
            (None, Some(_)) => return Err(AppError::not_found(source_id)),
            (Some(_), None) => return Err(AppError::not_found(target_id)),
        };

        // Combined-condition query: does the source document already list
        // the target among its friends?
        let linked = self
            .collection
            .find_one(doc! { "id": source_id, "friends": target_id })
            .await?;
        if linked.is_some() {
            return Err(AppError::AlreadyFriends(
                source_id.to_string(),
                target_id.to_string(),
            ));
        }

        self.collection
            .update_one(
                doc! { "id": source_id },
                doc! { "$addToSet": { "friends": target_id } },
            )
            .await?;
        self.collection
            .update_one(
                doc! { "id": target_id },
                doc! { "$addToSet": { "friends": source_id } },
            )
            .await?;

        tracing::debug!("linked users {} and {}", source_id, target_id);
        Ok(format!("{} and {} are now friends", source.name, target.name))
    }

    async fn delete(&self, id: &str) -> AppResult<String> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(id))?;

        // Cascade first: strip the identifier from every referencing
        // document, then drop the record itself.
        self.collection
            .update_many(doc! { "friends": id }, doc! { "$pull": { "friends": id } })
            .await?;

        let result = self.collection.delete_one(doc! { "id": id }).await?;
        if result.deleted_count == 0 {
            return Err(AppError::not_found(id));
        }

        tracing::debug!("deleted user {}", id);
        Ok(format!("user {} deleted", user.name))
    }

    /// Dereferences the user's own `friends` array. The queried user's list
    /// is authoritative; a peer that references this user one-sidedly does
    /// not appear in the result.
    async fn find_friends(&self, id: &str) -> AppResult<Vec<User>> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(id))?;

        if user.friends.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection
            .find(doc! { "id": { "$in": user.friends.clone() } })
            .await?;
        let fetched: Vec<User> = cursor.try_collect().await?;

        // Return records in the order the user lists them
        let mut by_id: HashMap<String, User> =
            fetched.into_iter().map(|u| (u.id.clone(), u)).collect();
        let friends = user
            .friends
            .iter()
            .filter_map(|friend_id| by_id.remove(friend_id))
            .collect();

        tracing::debug!("listed friends of user {}", id);
        Ok(friends)
    }

    async fn update_age(&self, id: &str, age: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "age": age } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::not_found(id));
        }

        tracing::debug!("updated age of user {}", id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.database.ping().await
    }
}
