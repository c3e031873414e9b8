//! In-memory EventRepository
//!
//! Stands in for MongoDB in handler tests and local runs without a database.
//! Ordering follows MongoDB's cross-type comparison closely enough for the
//! values JSON can express.

use crate::error::Result;
use crate::models::{Event, EventFields, ID_FIELD, Pagination};
use crate::repository::EventRepository;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::cmp::Ordering;
use tokio::sync::RwLock;

/// Event store backed by a `Vec` behind a lock
#[derive(Default)]
pub struct InMemoryEventRepository {
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

/// Rank of a JSON type in MongoDB's BSON comparison order.
/// Missing and `null` share the lowest rank.
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Descending by `schedule`, then descending by id
fn list_order(a: &Event, b: &Event) -> Ordering {
    compare_values(b.schedule(), a.schedule()).then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == *id).cloned())
    }

    async fn list(&self, pagination: &Pagination) -> Result<Vec<Event>> {
        let mut events = self.events.read().await.clone();
        events.sort_by(list_order);

        let skip = usize::try_from(pagination.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
        Ok(events.into_iter().skip(skip).take(limit).collect())
    }

    async fn insert(&self, mut fields: EventFields) -> Result<ObjectId> {
        fields.remove(ID_FIELD);
        let id = ObjectId::new();
        self.events.write().await.push(Event::new(id, fields));
        Ok(id)
    }

    async fn update(&self, id: &ObjectId, mut fields: EventFields) -> Result<u64> {
        fields.remove(ID_FIELD);
        let mut events = self.events.write().await;

        match events.iter_mut().find(|e| e.id == *id) {
            Some(event) => {
                event.fields.extend(fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<u64> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|e| e.id != *id);
        Ok((before - events.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> EventFields {
        value.as_object().cloned().unwrap()
    }

    async fn seeded(schedules: &[Value]) -> InMemoryEventRepository {
        let repo = InMemoryEventRepository::new();
        for (i, schedule) in schedules.iter().enumerate() {
            repo.insert(fields(json!({"n": i, "schedule": schedule})))
                .await
                .unwrap();
        }
        repo
    }

    fn schedules(events: &[Event]) -> Vec<Value> {
        events
            .iter()
            .map(|e| e.schedule().cloned().unwrap_or(Value::Null))
            .collect()
    }

    #[tokio::test]
    async fn test_list_orders_by_schedule_descending() {
        let repo = seeded(&[json!(3), json!(10), json!(1.5), json!(7)]).await;

        let page = repo.list(&Pagination::new(1, 10)).await.unwrap();
        assert_eq!(
            schedules(&page),
            vec![json!(10), json!(7), json!(3), json!(1.5)]
        );
    }

    #[tokio::test]
    async fn test_missing_schedule_sorts_last() {
        let repo = seeded(&[json!(2), Value::Null, json!("2024-06-01")]).await;
        repo.insert(fields(json!({"title": "no schedule"})))
            .await
            .unwrap();

        let page = repo.list(&Pagination::default()).await.unwrap();
        assert_eq!(page[0].schedule(), Some(&json!("2024-06-01")));
        assert_eq!(page[1].schedule(), Some(&json!(2)));
        assert!(page[2..].iter().all(|e| e.schedule().is_none_or(Value::is_null)));
    }

    #[tokio::test]
    async fn test_pages_partition_the_sorted_sequence() {
        let values: Vec<Value> = (0..7).map(|i| json!(i % 3)).collect();
        let repo = seeded(&values).await;

        let full = repo.list(&Pagination::new(1, 100)).await.unwrap();
        let mut stitched = Vec::new();
        for page in 1..=4 {
            let chunk = repo.list(&Pagination::new(page, 2)).await.unwrap();
            assert!(chunk.len() <= 2);
            stitched.extend(chunk);
        }

        assert_eq!(stitched, full);
        assert!(repo.list(&Pagination::new(5, 2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_id() {
        let repo = InMemoryEventRepository::new();
        let id = repo
            .insert(fields(json!({"title": "A", "schedule": 5})))
            .await
            .unwrap();

        let other = ObjectId::new();
        let matched = repo
            .update(&id, fields(json!({"title": "B", "_id": other.to_hex()})))
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let event = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(event.id, id);
        assert_eq!(
            Value::Object(event.fields),
            json!({"title": "B", "schedule": 5})
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_report_misses() {
        let repo = InMemoryEventRepository::new();
        let missing = ObjectId::new();

        assert_eq!(repo.update(&missing, fields(json!({"a": 1}))).await.unwrap(), 0);
        assert_eq!(repo.delete(&missing).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_once() {
        let repo = seeded(&[json!(1)]).await;
        let id = repo.list(&Pagination::default()).await.unwrap()[0].id;

        assert_eq!(repo.delete(&id).await.unwrap(), 1);
        assert_eq!(repo.delete(&id).await.unwrap(), 0);
        assert!(repo.is_empty().await);
    }
}
