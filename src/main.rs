mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod utils;
mod views;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::env;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{FuncionarioStore, PgFuncionarioStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    // Initialize the database pool
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = db::create_pool(&database_url)
        .await
        .expect("Failed to connect to the database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // The gateway is constructed once and shared read-only across requests.
    let store: Arc<dyn FuncionarioStore> = Arc::new(PgFuncionarioStore::new(pool));
    let store = web::Data::from(store);
    let config_data = web::Data::new(config.clone());

    info!("Starting server at {}", config.bind_addr);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(config_data.clone())
            .configure(handlers::funcionario::configure)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
