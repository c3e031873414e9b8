//! Event domain models

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

/// Name of the identifier field, assigned by the store
pub const ID_FIELD: &str = "_id";

/// Field list results are ordered by, most recent first
pub const SCHEDULE_FIELD: &str = "schedule";

/// Page used when `page` is missing or not a positive integer
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when `limit` is missing or not a positive integer
pub const DEFAULT_LIMIT: u64 = 10;

/// Client-supplied event fields. Any JSON object is accepted.
pub type EventFields = Map<String, Value>;

/// A stored event: the store-assigned `_id` plus whatever the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Identifier as a 24-character hex string
    #[serde(rename = "_id", with = "object_id_hex")]
    #[schema(value_type = String, example = "65a1f2c3d4e5f60718293a4b")]
    pub id: ObjectId,

    /// Arbitrary client fields (e.g. `title`, `schedule`)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: EventFields,
}

impl Event {
    pub fn new(id: ObjectId, fields: EventFields) -> Self {
        Self { id, fields }
    }

    /// Value of the `schedule` field, if present
    pub fn schedule(&self) -> Option<&Value> {
        self.fields.get(SCHEDULE_FIELD)
    }
}

/// Body returned by a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedEvent {
    #[serde(rename = "eventId", with = "object_id_hex")]
    #[schema(value_type = String, example = "65a1f2c3d4e5f60718293a4b")]
    pub event_id: ObjectId,
}

/// Raw list query parameters.
///
/// Kept as strings so that junk like `?page=abc` falls back to the defaults
/// instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10)
    pub limit: Option<String>,
}

impl ListQuery {
    /// Build from decoded query pairs. The first occurrence of a repeated key
    /// wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Offset pagination over the schedule-ordered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Documents to skip: `(page - 1) * limit`, saturating on huge inputs.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

impl From<ListQuery> for Pagination {
    fn from(query: ListQuery) -> Self {
        Self {
            page: positive_int(query.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: positive_int(query.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
        }
    }
}

/// Lenient integer coercion for query parameters.
///
/// Reads an optional sign and the leading run of digits after any leading
/// whitespace (`"12abc"` is 12, `"3.9"` is 3, `"0x1f"` is 31). Returns `None`
/// for anything that has no leading digits or is not at least 1.
fn positive_int(raw: Option<&str>) -> Option<u64> {
    let s = raw?.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: Option<u64> = None;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(u64::from(radix))
                .saturating_add(u64::from(d)),
        );
    }

    match value {
        Some(v) if v >= 1 && !negative => Some(v),
        _ => None,
    }
}

/// Serde helpers for an `ObjectId` carried as a plain hex string in JSON
pub(crate) mod object_id_hex {
    use mongodb::bson::oid::ObjectId;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ObjectId, D::Error> {
        let hex = String::deserialize(deserializer)?;
        ObjectId::parse_str(&hex).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(page: Option<&str>, limit: Option<&str>) -> Pagination {
        ListQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
        .into()
    }

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(query(None, None), Pagination::new(1, 10));
        assert_eq!(Pagination::default().skip(), 0);
    }

    #[test]
    fn test_pagination_skip() {
        assert_eq!(query(Some("3"), Some("20")).skip(), 40);
        assert_eq!(Pagination::new(u64::MAX, u64::MAX).skip(), u64::MAX);
    }

    #[test]
    fn test_non_numeric_values_fall_back() {
        assert_eq!(query(Some("abc"), Some("")), Pagination::new(1, 10));
        assert_eq!(query(Some("  "), Some("x5")), Pagination::new(1, 10));
    }

    #[test]
    fn test_zero_and_negative_fall_back() {
        assert_eq!(query(Some("0"), Some("0")), Pagination::new(1, 10));
        assert_eq!(query(Some("-2"), Some("-5")), Pagination::new(1, 10));
    }

    #[test]
    fn test_leading_digits_are_used() {
        assert_eq!(query(Some(" 2pages"), Some("3.9")), Pagination::new(2, 3));
        assert_eq!(query(Some("+4"), Some("0x10")), Pagination::new(4, 16));
    }

    #[test]
    fn test_repeated_keys_use_first_value() {
        let pairs = [("page", "2"), ("limit", "5"), ("page", "9"), ("sort", "x"), ("limit", "1")]
            .map(|(k, v)| (k.to_string(), v.to_string()));
        let query = ListQuery::from_pairs(pairs);

        assert_eq!(query.page.as_deref(), Some("2"));
        assert_eq!(query.limit.as_deref(), Some("5"));
        assert_eq!(Pagination::from(query), Pagination::new(2, 5));
    }

    #[test]
    fn test_huge_values_saturate() {
        let p = query(Some("99999999999999999999999"), Some("5"));
        assert_eq!(p.page, u64::MAX);
    }

    #[test]
    fn test_event_serializes_id_as_hex_alongside_fields() {
        let id = ObjectId::parse_str("65a1f2c3d4e5f60718293a4b").unwrap();
        let fields = json!({"title": "A", "schedule": 5})
            .as_object()
            .cloned()
            .unwrap();
        let event = Event::new(id, fields);

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"_id": "65a1f2c3d4e5f60718293a4b", "title": "A", "schedule": 5})
        );
        assert_eq!(event.schedule(), Some(&json!(5)));
    }

    #[test]
    fn test_event_deserializes_from_json() {
        let event: Event = serde_json::from_value(json!({
            "_id": "65a1f2c3d4e5f60718293a4b",
            "title": "B"
        }))
        .unwrap();

        assert_eq!(event.id.to_hex(), "65a1f2c3d4e5f60718293a4b");
        assert_eq!(event.fields.get("title"), Some(&json!("B")));
        assert!(!event.fields.contains_key(ID_FIELD));
    }

    #[test]
    fn test_created_event_uses_event_id_key() {
        let id = ObjectId::parse_str("65a1f2c3d4e5f60718293a4b").unwrap();
        assert_eq!(
            serde_json::to_value(CreatedEvent { event_id: id }).unwrap(),
            json!({"eventId": "65a1f2c3d4e5f60718293a4b"})
        );
    }
}
