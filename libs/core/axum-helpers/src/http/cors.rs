use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// Environment variable holding comma-separated allowed origins
pub const CORS_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";

/// Creates a CORS layer for the given origins.
///
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Builds a CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Returns `Ok(None)` when the variable is unset, so browsers get the
/// same-origin default. A set but empty or unparsable value is an error.
pub fn cors_layer_from_env() -> io::Result<Option<CorsLayer>> {
    let Ok(origins_str) = std::env::var(CORS_ALLOWED_ORIGIN) else {
        return Ok(None);
    };

    let allowed_origins: Vec<HeaderValue> = origins_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ALLOWED_ORIGIN, e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ALLOWED_ORIGIN),
        ));
    }

    info!("CORS configured with allowed origins: {}", origins_str);
    Ok(Some(create_cors_layer(allowed_origins)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_unset_means_no_layer() {
        temp_env::with_var_unset(CORS_ALLOWED_ORIGIN, || {
            assert!(cors_layer_from_env().unwrap().is_none());
        });
    }

    #[test]
    fn test_cors_parses_origin_list() {
        temp_env::with_var(
            CORS_ALLOWED_ORIGIN,
            Some("http://localhost:3000, https://example.com"),
            || {
                assert!(cors_layer_from_env().unwrap().is_some());
            },
        );
    }

    #[test]
    fn test_cors_rejects_empty_list() {
        temp_env::with_var(CORS_ALLOWED_ORIGIN, Some(" , "), || {
            let err = cors_layer_from_env().unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        });
    }
}
