//! Database library providing the MongoDB connector used by the events API
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "database");
//! let client = connect_from_config(&config).await?;
//! let events = client
//!     .database(config.database())
//!     .collection::<Document>(config.collection());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
