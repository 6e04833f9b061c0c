//! sportify/crates/sf-api/src/middleware.rs Middleware
//!
//! Custom middleware for security headers, logging, and cross-origin access.

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};

// Returns the request logger used in front of every route.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent" time
    Logger::new(r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#)
}

// Configures CORS (Cross-Origin Resource Sharing)
// The JSON API is called from the marketing site, which may live on another origin.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(actix_web::http::header::CONTENT_TYPE)
        .max_age(3600)
}

// Security headers added to every response.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
        .add(("X-Frame-Options", "DENY"))
}
