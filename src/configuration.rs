use config::{Config, Environment as EnvSource, File, FileFormat};
use serde::{Deserialize, Deserializer};
use sqlx::postgres::PgPoolOptions;
use std::fmt;
use std::time::Duration;

const DATABASE_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    #[serde(default)]
    pub cors_trusted_origins: Vec<String>,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Per-connection limits of the HTTP server.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    #[serde(deserialize_with = "human_duration")]
    pub idle_timeout: Duration,
    #[serde(deserialize_with = "human_duration")]
    pub read_timeout: Duration,
    #[serde(deserialize_with = "human_duration")]
    pub write_timeout: Duration,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub user_name: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    #[serde(default)]
    pub require_ssl: bool,
    /// Full connection string, takes precedence over the individual parts.
    #[serde(default)]
    pub dsn: Option<String>,
    pub max_open_connections: u32,
    #[serde(deserialize_with = "human_duration")]
    pub max_idle_time: Duration,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        if let Some(dsn) = self.dsn.as_ref().filter(|dsn| !dsn.is_empty()) {
            return dsn.clone();
        }
        let ssl_mode = if self.require_ssl { "require" } else { "prefer" };
        format!(
            "postgresql://{}:{}@{}:{}/{}?sslmode={}",
            self.user_name, self.password, self.host, self.port, self.database_name, ssl_mode
        )
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_open_connections)
            .idle_timeout(self.max_idle_time)
            .acquire_timeout(DATABASE_ACQUIRE_TIMEOUT)
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn human_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(raw.trim()).map_err(serde::de::Error::custom)
}

/// Reads `<filename>.json`, then `APP_`-prefixed environment variables
/// (`APP_APPLICATION__PORT=8080`). `DATABASE_URL` overrides the DSN.
pub fn get_configuration(filename: &str) -> Result<Settings, config::ConfigError> {
    let config = Config::builder()
        .add_source(File::new(filename, FileFormat::Json))
        .add_source(
            EnvSource::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.dsn", std::env::var("DATABASE_URL").ok())?
        .build()?;
    config.try_deserialize()
}
