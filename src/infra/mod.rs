//! Infrastructure layer: the MongoDB bootstrap and the storage backends
//! implementing the repository contract.

pub mod db;
pub mod repositories;

pub use db::Database;
pub use repositories::{MemoryStore, MongoStore, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
