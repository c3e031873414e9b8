//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers

pub mod cors;
pub mod security;

pub use cors::{create_cors_layer, cors_layer_from_env};
pub use security::security_headers;
