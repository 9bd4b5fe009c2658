//! HTTP layer: handlers, extractors, routes, and shared state.

pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
