//! Event repository trait

use crate::error::Result;
use crate::models::{Event, EventFields, Pagination};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Document-store operations behind the events API.
///
/// Each HTTP request maps to exactly one of these calls. Implementations
/// report counts instead of errors for "nothing matched" so the service
/// decides what a miss means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Get the event with this id
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Event>>;

    /// Events ordered by `schedule` descending, one page at a time
    async fn list(&self, pagination: &Pagination) -> Result<Vec<Event>>;

    /// Store a new event and return its assigned id
    async fn insert(&self, fields: EventFields) -> Result<ObjectId>;

    /// Merge `fields` into the event; returns the number of matched documents
    async fn update(&self, id: &ObjectId, fields: EventFields) -> Result<u64>;

    /// Remove the event; returns the number of deleted documents
    async fn delete(&self, id: &ObjectId) -> Result<u64>;
}
