use std::{io, sync::Arc};

use actix_cors::Cors;
use actix_web::{
    http::{header, Method},
    middleware::{Logger, NormalizePath},
    web, App, HttpServer,
};
use diesel::{pg::PgConnection, r2d2::ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod auth;
mod config;
mod errors;
mod handlers;
mod models;
mod schema;
mod store;
mod utils;

use crate::{
    auth::TokenVerifier,
    config::Config,
    store::{Pool, SessionSource},
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn startup_error<E: std::fmt::Display>(context: &str, e: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{context}: {e}"))
}

fn run_migrations(pool: &Pool) -> io::Result<()> {
    let mut connection = pool
        .get()
        .map_err(|e| startup_error("failed to get a pg connection", e))?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| startup_error("failed to run migrations", e))?;
    for version in applied {
        log::info!("applied migration {version}");
    }

    Ok(())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .build(manager)
        .map_err(|e| startup_error("failed to create a pg pool", e))?;
    run_migrations(&pool)?;

    let source: Arc<dyn SessionSource> = Arc::new(pool);
    let verifier = web::Data::new(TokenVerifier::from_config(&config));
    let sessions = web::Data::from(source);
    let allowed_origin = config.allowed_origin.clone();

    log::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(verifier.clone())
            .app_data(sessions.clone())
            .wrap(NormalizePath::trim())
            .wrap(
                Cors::default()
                    .allowed_origin(&allowed_origin)
                    .allowed_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
                    .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(handlers::routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
