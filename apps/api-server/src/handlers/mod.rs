//! HTTP handlers and route configuration.

mod health;
mod ideas;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Idea routes; fixed segments before `{id}`
            .service(
                web::scope("/ideas")
                    .route("", web::get().to(ideas::list))
                    .route("", web::post().to(ideas::create))
                    .route("/summary", web::get().to(ideas::summary))
                    .route("/categories", web::get().to(ideas::categories))
                    .route("/{id}", web::get().to(ideas::get))
                    .route("/{id}", web::put().to(ideas::update))
                    .route("/{id}", web::delete().to(ideas::delete))
                    .route("/{id}/expand", web::post().to(ideas::expand)),
            ),
    );
}
