//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod resources;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        // Public routes
        .route("/health", web::get().to(health::health_check))
        // Auth routes
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/me", web::get().to(auth::me)),
        )
        // Posts: reads are public, writes need an owner
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::index))
                .route("", web::post().to(posts::store))
                .route("/{id}", web::get().to(posts::show))
                .route("/{id}", web::put().to(posts::update))
                .route("/{id}", web::patch().to(posts::update))
                .route("/{id}", web::delete().to(posts::destroy)),
        )
        .route("/me/posts", web::get().to(posts::mine));
}

/// Malformed JSON bodies become RFC 7807 400 responses.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
