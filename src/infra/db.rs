//! MongoDB connection bootstrap.

use mongodb::bson::doc;
use mongodb::{Client, Collection};

use crate::config::Config;
use crate::domain::User;
use crate::errors::AppResult;

/// Handle to the service's MongoDB database.
#[derive(Clone)]
pub struct Database {
    database: mongodb::Database,
}

impl Database {
    /// Connect and verify the connection with a ping before serving.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.mongodb_url).await?;
        let database = client.database(&config.mongodb_database);

        database.run_command(doc! { "ping": 1 }).await?;

        Ok(Self { database })
    }

    /// Typed handle to a user collection.
    pub fn users_collection(&self, name: &str) -> Collection<User> {
        self.database.collection(name)
    }

    /// Connectivity probe for the health endpoint.
    pub async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
