use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

pub struct Telemetry<T>
where
    T: SubscriberExt + Send + Sync + 'static,
{
    pub subscriber: T,
}

/// Bunyan JSON records named after `service`. `RUST_LOG` takes precedence
/// over `default_filter` when it is set and valid.
pub fn get_subscriber<Sink>(
    service: &str,
    default_filter: &str,
    sink: Sink,
) -> Telemetry<impl SubscriberExt + Send + Sync + 'static>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    Telemetry {
        subscriber: Registry::default()
            .with(filter_layer)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(service.to_owned(), sink)),
    }
}

/// Installs the subscriber process-wide and routes `log` records into it.
/// Fails if either was already installed.
pub fn init_subscriber(
    telemetry: Telemetry<impl SubscriberExt + Send + Sync + 'static>,
) -> anyhow::Result<()> {
    LogTracer::init()?;
    set_global_default(telemetry.subscriber)?;
    Ok(())
}
