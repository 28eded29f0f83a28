use dotenv::dotenv;
use movie_api::configuration::get_configuration;
use movie_api::startup::{connect_database, run_migrations, run_server};
use movie_api::telemetry::{get_subscriber, init_subscriber};
use std::io::Error;
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let configuration = get_configuration("configuration").map_err(|err| {
        Error::other(format!(
            "Failed to read `configuration.json`. Please make sure it exists and is valid JSON: {err}"
        ))
    })?;

    let subscriber = get_subscriber(
        "movie_api",
        "info",
        configuration.application.environment,
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let connection_pool = connect_database(&configuration.database)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to connect to database");
            Error::other(err)
        })?;
    tracing::info!(
        max_connections = configuration.database.max_open_connections,
        "database connection pool established"
    );

    run_migrations(&connection_pool).await.map_err(|err| {
        tracing::error!(error = %err, "failed to apply migrations");
        Error::other(err)
    })?;
    tracing::info!("database migrations applied");

    let listener = TcpListener::bind(configuration.application.address())?;
    tracing::info!(
        environment = %configuration.application.environment,
        address = %listener.local_addr()?,
        "starting server"
    );
    run_server(listener, connection_pool, &configuration)?.await
}
