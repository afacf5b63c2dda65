// CORS middleware
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// CORS layer allowing either any origin or exactly `allowed_origin`.
pub fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    match allowed_origin {
        None => layer.allow_origin(Any),
        Some(origin) => match origin.trim().parse::<HeaderValue>() {
            Ok(value) => layer.allow_origin(AllowOrigin::exact(value)),
            Err(_) => {
                warn!("Invalid allowed origin {:?}, rejecting all cross-origin requests", origin);
                layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
            },
        },
    }
}
