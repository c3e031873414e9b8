//! Event service layer

use crate::error::{EventError, Result};
use crate::models::{Event, EventFields, ID_FIELD, Pagination};
use crate::repository::EventRepository;
use mongodb::bson::oid::ObjectId;
use tracing::{info, instrument};

/// Business rules over an [`EventRepository`]
pub struct EventService<R: EventRepository> {
    repository: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Get event by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Event> {
        let oid = parse_id(id)?;
        self.repository
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| EventError::NotFound { id: id.to_string() })
    }

    /// One page of events, `schedule` descending
    #[instrument(skip(self))]
    pub async fn list(&self, pagination: Pagination) -> Result<Vec<Event>> {
        self.repository.list(&pagination).await
    }

    /// Store a new event and return its id
    #[instrument(skip(self, fields), fields(field_count = fields.len()))]
    pub async fn create(&self, mut fields: EventFields) -> Result<ObjectId> {
        fields.remove(ID_FIELD);

        let id = self.repository.insert(fields).await?;
        info!(event_id = %id, "Event created");
        Ok(id)
    }

    /// Merge `fields` into an existing event
    #[instrument(skip(self, fields), fields(field_count = fields.len()))]
    pub async fn update(&self, id: &str, mut fields: EventFields) -> Result<()> {
        let oid = parse_id(id)?;
        fields.remove(ID_FIELD);

        match self.repository.update(&oid, fields).await? {
            0 => Err(EventError::NotFound { id: id.to_string() }),
            _ => {
                info!(event_id = %oid, "Event updated");
                Ok(())
            }
        }
    }

    /// Delete event by ID
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let oid = parse_id(id)?;

        match self.repository.delete(&oid).await? {
            0 => Err(EventError::NotFound { id: id.to_string() }),
            _ => {
                info!(event_id = %oid, "Event deleted");
                Ok(())
            }
        }
    }
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| EventError::InvalidId { id: id.to_string() })
}
