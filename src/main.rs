use std::sync::Arc;
use std::time::Duration;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod leave;
mod model;
mod models;
mod routes;
mod store;
#[cfg(test)]
mod test_support;

use config::Config;
use db::init_db;

use crate::docs::ApiDoc;
use crate::store::LeaveHistorySource;
use crate::store::cache::CachedSource;
use crate::store::mysql::MySqlLeaveStore;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Leave history service"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await?;

    let store: Arc<dyn LeaveHistorySource> = Arc::new(MySqlLeaveStore::new(pool));
    let source: Arc<dyn LeaveHistorySource> = Arc::new(CachedSource::new(
        store,
        Duration::from_secs(config.reference_cache_ttl_secs),
    ));

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    info!(%server_addr, api_prefix = %config.api_prefix, "Binding HTTP server");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(source.clone()))
            .app_data(Data::new(config.clone()))
            .service(index)
            // leave routes behind auth + rate limiting
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
