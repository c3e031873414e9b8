//! MongoDB implementation of EventRepository

use crate::error::{EventError, Result};
use crate::models::{Event, EventFields, ID_FIELD, Pagination, SCHEDULE_FIELD};
use crate::repository::EventRepository;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use mongodb::{Collection, Database, IndexModel};
use serde_json::Value;
use tracing::{debug, instrument};

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<Document>,
}

impl MongoEventRepository {
    /// Create a repository over the named collection
    pub fn with_collection(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection(collection_name),
        }
    }

    /// Index backing the list ordering. Safe to run on every startup.
    pub async fn create_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(list_sort())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }
}

/// `schedule` descending, `_id` descending to keep pages stable on ties
fn list_sort() -> Document {
    doc! { SCHEDULE_FIELD: -1, ID_FIELD: -1 }
}

fn id_filter(id: &ObjectId) -> Document {
    doc! { ID_FIELD: *id }
}

/// Convert client JSON into a BSON document, dropping any `_id` it carries.
fn to_document(mut fields: EventFields) -> Document {
    fields.remove(ID_FIELD);
    fields
        .into_iter()
        .map(|(key, value)| (key, to_bson(value)))
        .collect()
}

/// Integers that fit are stored as Int32/Int64; anything larger (or
/// fractional) becomes a double, so every JSON number has a BSON form.
fn to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).map_or(Bson::Int64(i), Bson::Int32),
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(to_bson).collect()),
        Value::Object(map) => Bson::Document(
            map.into_iter()
                .map(|(key, value)| (key, to_bson(value)))
                .collect(),
        ),
    }
}

/// Convert a stored document into an [`Event`].
///
/// Non-JSON BSON types (dates, binary, ...) come out in relaxed Extended JSON.
fn from_document(mut document: Document) -> Result<Event> {
    let id = match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(id)) => id,
        other => {
            return Err(EventError::Serialization {
                message: format!("stored document has no ObjectId _id: {:?}", other),
            });
        }
    };

    match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(fields) => Ok(Event::new(id, fields)),
        other => Err(EventError::Serialization {
            message: format!("stored document is not an object: {}", other),
        }),
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self), fields(event_id = %id))]
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Event>> {
        self.collection
            .find_one(id_filter(id))
            .await?
            .map(from_document)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, pagination: &Pagination) -> Result<Vec<Event>> {
        let limit = i64::try_from(pagination.limit).unwrap_or(i64::MAX);

        let cursor = self
            .collection
            .find(doc! {})
            .sort(list_sort())
            .skip(pagination.skip())
            .limit(limit)
            .await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        debug!(count = documents.len(), "Events page fetched");

        documents.into_iter().map(from_document).collect()
    }

    #[instrument(skip(self, fields), fields(field_count = fields.len()))]
    async fn insert(&self, fields: EventFields) -> Result<ObjectId> {
        let result = self.collection.insert_one(to_document(fields)).await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| EventError::Serialization {
                message: format!("inserted _id is not an ObjectId: {}", result.inserted_id),
            })
    }

    #[instrument(skip(self, fields), fields(event_id = %id))]
    async fn update(&self, id: &ObjectId, fields: EventFields) -> Result<u64> {
        let changes = to_document(fields);

        // `$set` rejects an empty document; nothing to merge means just report the match.
        if changes.is_empty() {
            let matched = self.collection.count_documents(id_filter(id)).limit(1).await?;
            return Ok(matched);
        }

        let result = self
            .collection
            .update_one(id_filter(id), doc! { "$set": changes })
            .await?;
        Ok(result.matched_count)
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn delete(&self, id: &ObjectId) -> Result<u64> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count)
    }
}
