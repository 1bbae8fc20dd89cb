use actix_web::web;

use crate::handlers::{api, idea_handlers};

/// Register every route. The index and show routes are named so handlers
/// can build absolute URLs with `url_for_static`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .name(idea_handlers::INDEX_ROUTE)
            .route(web::get().to(idea_handlers::index)),
    )
    .service(web::resource("/ideas").route(web::post().to(idea_handlers::create)))
    .service(
        web::resource("/ideas/{slug}")
            .name(idea_handlers::SHOW_ROUTE)
            .route(web::get().to(idea_handlers::show)),
    )
    .route("/api/status-counts", web::get().to(api::status_counts));
}
