//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// User entity.
///
/// Doubles as the persisted document shape: `{id, name, age, friends}`.
/// The `id` field is the externally visible identifier assigned by the
/// repository, distinct from any store-internal identifier. `friends` holds
/// peer identifiers only, never embedded user records. `age` is stored
/// verbatim as a string and is not validated as numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: String,
    #[serde(default)]
    pub friends: Vec<String>,
}

impl User {
    /// Create a new user with no friends
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: age.into(),
            friends: Vec::new(),
        }
    }

    /// Check whether `id` is already listed as a friend
    pub fn is_friend(&self, id: &str) -> bool {
        self.friends.iter().any(|f| f == id)
    }
}

/// User response (returned to clients)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Repository-assigned user identifier
    pub id: String,
    /// User display name
    pub name: String,
    /// User age, stored verbatim
    pub age: String,
    /// Identifiers of the user's friends
    pub friends: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            friends: user.friends,
        }
    }
}
