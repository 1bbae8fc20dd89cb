use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use ideaboard::config::Config;
use ideaboard::store::{IdeaStore, PgStore};
use ideaboard::{db, handlers, routes, session};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool)
        .await
        .map_err(std::io::Error::other)?;
    db::seed_categories(&pool)
        .await
        .map_err(std::io::Error::other)?;

    let store: Arc<dyn IdeaStore> = Arc::new(PgStore::new(pool));
    let store = web::Data::from(store);
    let site = web::Data::new(config.site());
    let session_key = config.session_key.clone();

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(session::middleware(session_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(site.clone())
            .configure(routes::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
