use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

use crate::configuration::Environment;

/// Builds the process subscriber. Development gets readable lines, every
/// other environment emits Bunyan JSON.
pub fn get_subscriber<Sink>(
    name: impl Into<String>,
    env_filter: impl Into<String>,
    environment: Environment,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter.into()));

    let (json_layer, pretty_layer) = if environment == Environment::Development {
        let pretty = tracing_subscriber::fmt::Layer::new()
            .with_writer(sink)
            .with_target(false)
            .with_thread_ids(true)
            .with_ansi(false)
            .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339());
        (None, Some(pretty))
    } else {
        (Some(BunyanFormattingLayer::new(name.into(), sink)), None)
    };

    Registry::default()
        .with(env_filter)
        .with(json_layer.as_ref().map(|_| JsonStorageLayer))
        .with(json_layer)
        .with(pretty_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("Failed to initialize logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}
