//! # sf-api
//!
//! The web routing and orchestration layer for the sponsorship site.

pub mod cache;
pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::web;

pub use handlers::AppState;

/// Configures the routes for the sponsorship pages and the JSON API.
///
/// # Developer Note
/// Routes are registered on a `ServiceConfig` so the binary (and tests) can
/// mount them inside any `App` with their own middleware stack.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        // Landing page with the sponsor grid
        .route("/sponsorship", web::get().to(handlers::landing))
        // The application form and its submission
        .route("/sponsorship/packages", web::get().to(handlers::packages_form))
        .route("/sponsorship/packages", web::post().to(handlers::submit_packages))
        .service(
            web::scope("/api")
                .route("/sponsors", web::get().to(handlers::list_sponsors))
                .route("/sponsors", web::post().to(handlers::add_sponsor))
                .route("/applications", web::post().to(handlers::submit_application)),
        );
}
