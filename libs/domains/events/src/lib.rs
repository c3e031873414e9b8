//! Events Domain
//!
//! CRUD over schemaless event documents. Clients send arbitrary JSON
//! objects; the store assigns an ObjectId and lists come back ordered by the
//! `schedule` field, most recent first.
//!
//! # Layers
//!
//! ```text
//! handlers (axum) -> EventService -> EventRepository
//!                                      ├── MongoEventRepository
//!                                      └── InMemoryEventRepository
//! ```

mod error;
pub mod handlers;
mod memory;
mod models;
mod mongodb;
mod repository;
mod service;

pub use error::{EventError, NOT_FOUND_MESSAGE, Result};
pub use handlers::{ApiDoc, EventsState, router};
pub use memory::InMemoryEventRepository;
pub use models::{
    CreatedEvent, DEFAULT_LIMIT, DEFAULT_PAGE, Event, EventFields, ListQuery, Pagination,
};
pub use self::mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::EventService;
