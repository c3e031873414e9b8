#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or};

/// Default connection string when neither `MONGODB_URL` nor `MONGO_URL` is set
pub const DEFAULT_URL: &str = "mongodb://localhost:27017";
/// Default database name
pub const DEFAULT_DATABASE: &str = "database";
/// Default collection holding event documents
pub const DEFAULT_COLLECTION: &str = "events";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 30;

/// MongoDB database configuration
///
/// Can be constructed manually or loaded from environment variables (with the
/// `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb")
///     .with_collection("events")
///     .with_app_name("events-api");
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URL
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Collection holding the documents served by the API
    pub collection: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a new MongoConfig with just a URL and the default database
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Create a MongoConfig with a specific database name
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Set the collection name
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Get a reference to the MongoDB URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Get the collection name
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            app_name: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            server_selection_timeout_secs: DEFAULT_SERVER_SELECTION_TIMEOUT_SECS,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `MONGODB_URL` or `MONGO_URL` (default: `mongodb://localhost:27017`)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (default: `database`)
/// - `MONGODB_COLLECTION` (default: `events`)
/// - `MONGODB_APP_NAME` (optional) - Application name for server logs
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .unwrap_or_else(|_| DEFAULT_URL.to_string());

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        let collection = std::env::var("MONGODB_COLLECTION")
            .unwrap_or_else(|_| DEFAULT_COLLECTION.to_string());

        let app_name = std::env::var("MONGODB_APP_NAME").ok();

        let connect_timeout_secs =
            env_parse_or("MONGODB_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;
        let server_selection_timeout_secs = env_parse_or(
            "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
            DEFAULT_SERVER_SELECTION_TIMEOUT_SECS,
        )?;

        Ok(Self {
            url,
            database,
            collection,
            app_name,
            connect_timeout_secs,
            server_selection_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("mongodb://db:27017");
        assert_eq!(config.url(), "mongodb://db:27017");
        assert_eq!(config.database(), "database");
        assert_eq!(config.collection(), "events");
    }

    #[test]
    fn test_mongo_config_builders() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb")
            .with_collection("archive")
            .with_app_name("my-app");
        assert_eq!(config.database, "mydb");
        assert_eq!(config.collection, "archive");
        assert_eq!(config.app_name, Some("my-app".to_string()));
    }

    #[test]
    fn test_mongo_config_default() {
        let config = MongoConfig::default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.server_selection_timeout_secs, 30);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://mongo:27017")),
                ("MONGODB_DATABASE", Some("testdb")),
                ("MONGODB_COLLECTION", Some("calendar")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://mongo:27017");
                assert_eq!(config.database, "testdb");
                assert_eq!(config.collection, "calendar");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_fallback() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", Some("fallbackdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://fallback:27017");
                assert_eq!(config.database, "fallbackdb");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None::<&str>),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", None::<&str>),
                ("MONGODB_COLLECTION", None::<&str>),
                ("MONGODB_CONNECT_TIMEOUT_SECS", None::<&str>),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, DEFAULT_URL);
                assert_eq!(config.database, DEFAULT_DATABASE);
                assert_eq!(config.collection, DEFAULT_COLLECTION);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_invalid_timeout() {
        temp_env::with_var("MONGODB_CONNECT_TIMEOUT_SECS", Some("ten"), || {
            let err = MongoConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_CONNECT_TIMEOUT_SECS"));
        });
    }
}
