use movie_api::configuration::{get_configuration, Settings};
use movie_api::telemetry::{get_subscriber, init_subscriber};
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::LazyLock;

static TRACING: LazyLock<()> = LazyLock::new(|| {
    let settings = get_configuration("test_configuration").expect("Failed to read configuration file");
    let environment = settings.application.environment;
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber("test", "debug", environment, std::io::stdout));
    } else {
        init_subscriber(get_subscriber("test", "debug", environment, std::io::sink));
    }
});

pub struct TestApp {
    pub address: String,
    pub settings: Settings,
}

impl TestApp {
    pub async fn post_movie(&self, body: impl Into<reqwest::Body>) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/v1/movies", self.address))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

// Handlers never touch the database yet, so the pool connects lazily and the
// tests run without a Postgres instance.
fn lazy_pool(settings: &Settings) -> PgPool {
    settings
        .database
        .pool_options()
        .connect_lazy(&settings.database.connection_string())
        .expect("Failed to build connection pool")
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    let settings = get_configuration("test_configuration").expect("Failed to read configuration file");
    let listener = TcpListener::bind(settings.application.address()).expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();
    let server = movie_api::startup::run_server(listener, lazy_pool(&settings), &settings)
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        settings,
    }
}
