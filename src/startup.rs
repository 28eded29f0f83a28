use crate::configuration::{DatabaseSettings, Settings};
use crate::routes::{health_check, method_not_allowed, movie_source, not_found};
use actix_web::{
    dev::Server,
    web::{self, Data},
    App, HttpServer,
};
use sqlx::{migrate::MigrateError, PgPool};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use actix_cors::Cors;
use actix_web::http::header;

fn configure_cors(trusted_origins: &[String]) -> Cors {
    let mut cors = Cors::default();
    for origin in trusted_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }
    cors.allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

/// Opens the pool and waits for a first connection, so an unreachable
/// database fails startup.
pub async fn connect_database(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    settings
        .pool_options()
        .connect(&settings.connection_string())
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub fn run_server(
    listener: TcpListener,
    db_pool: PgPool,
    settings: &Settings,
) -> Result<Server, std::io::Error> {
    let db_pool = Data::new(db_pool);
    let application = Data::new(settings.application.clone());
    let trusted_origins = settings.application.cors_trusted_origins.clone();

    let server = HttpServer::new(move || {
        let cors = configure_cors(&trusted_origins);

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(db_pool.clone())
            .app_data(application.clone())
            .service(
                web::resource(["/", "/v1/healthcheck"])
                    .route(web::get().to(health_check))
                    .default_service(method_not_allowed("GET")),
            )
            .service(movie_source())
            .default_service(web::to(not_found))
    })
    .keep_alive(settings.server.idle_timeout)
    .client_request_timeout(settings.server.read_timeout)
    .client_disconnect_timeout(settings.server.write_timeout)
    .listen(listener)?
    .run();

    Ok(server)
}
