//! Application state shared by the route builders.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: the MongoDB handles share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, also used by the readiness probe
    pub mongo_client: Client,
    /// Database holding the events collection
    pub db: Database,
}
