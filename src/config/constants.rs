//! Application-wide constants, grouped by the concern they configure.

// =============================================================================
// Server
// =============================================================================

/// Default host to bind the HTTP server to
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default port for the HTTP server
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// Storage
// =============================================================================

/// Default MongoDB connection string
pub const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017";

/// Default database name
pub const DEFAULT_MONGODB_DATABASE: &str = "friends";

/// Default collection holding user documents
pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// Identifier assigned to the first user created in an empty store
pub const FIRST_USER_ID: &str = "1";
