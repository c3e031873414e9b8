//! Events API routes
//!
//! Wires the events domain to the configured MongoDB collection.

use crate::state::AppState;
use axum::Router;
use domain_events::{EventService, MongoEventRepository};
use tracing::info;

fn repository(state: &AppState) -> MongoEventRepository {
    MongoEventRepository::with_collection(&state.db, state.config.mongodb.collection())
}

/// Create the events router
pub fn router(state: &AppState) -> Router {
    let service = EventService::new(repository(state));

    // Use the domain's router
    domain_events::router(service)
}

/// Create the index backing list ordering
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    info!(
        collection = state.config.mongodb.collection(),
        "Event collection indexes created"
    );
    Ok(())
}
