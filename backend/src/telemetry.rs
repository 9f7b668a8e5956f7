// Tracing subscriber setup
//

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Layer, Registry,
};

pub struct TracingSubscriber {
    pretty: bool,
    filter: String,
}

impl Default for TracingSubscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingSubscriber {
    pub fn new() -> Self {
        Self {
            pretty: false,
            filter: "info".into(),
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Fallback directives, `RUST_LOG` takes precedence when set
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn build<W>(self, sink: W) -> impl Subscriber + Send + Sync
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter));

        let fmt_layer = if self.pretty {
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(sink)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(sink)
                .boxed()
        };

        Registry::default().with(env_filter).with(fmt_layer)
    }
}

/// Install `subscriber` for the whole process and route `log` records into it.
///
/// Fails when called twice.
pub fn init_global_default(subscriber: impl Subscriber + Send + Sync) -> anyhow::Result<()> {
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
