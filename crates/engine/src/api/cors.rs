//! CORS policy for browser clients on another origin.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer from `CORS_ALLOWED_ORIGINS`.
///
/// `*` allows any origin; otherwise the value is a comma-separated origin
/// list. Returns `None` when nothing usable is configured, in which case no
/// CORS headers are sent.
pub fn cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins.map(str::trim).filter(|s| !s.is_empty())?;

    let origins = if allowed_origins == "*" {
        None
    } else {
        let parsed: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match HeaderValue::from_str(s) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = s, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        if parsed.is_empty() {
            return None;
        }
        Some(parsed)
    };

    // Methods used by the item routes; preflight OPTIONS is answered by the layer.
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Some(match origins {
        Some(list) => layer.allow_origin(list),
        None => layer.allow_origin(Any),
    })
}
