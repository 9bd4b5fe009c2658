//! Friends API - users and their mutual friend links over a document store.
//!
//! The repository contract in [`infra::repositories`] is the heart of the
//! crate: symmetric friend linking, cascading deletion, and friend listing,
//! served by either an in-memory map or a MongoDB collection. Everything
//! else is the surface around it.
//!
//! # Layers
//!
//! - **cli** / **commands**: argument parsing and command dispatch
//! - **config**: environment settings and constants
//! - **domain**: the `User` entity, doubling as the persisted document shape
//! - **infra**: MongoDB bootstrap and the storage backends
//! - **api**: axum handlers, extractors, and routes
//! - **types**: the shared response envelope
//! - **errors**: the application error type and its HTTP rendering
//!
//! # Running
//!
//! ```bash
//! # Serve against MongoDB (default)
//! cargo run -- serve
//!
//! # Serve against the in-memory backend
//! STORAGE_BACKEND=memory cargo run -- serve
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::User;
pub use errors::{AppError, AppResult};
pub use infra::{MemoryStore, MongoStore, UserRepository};
