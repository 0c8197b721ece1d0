//! Tools to set up a [tracing_subscriber] to report instrumentation.

use super::config::InstrumentationConfig;
use super::config::logs::LoggingConfigError;
use super::logs;
use super::otel::providers::{OtelProviderBuildError, OtelProviders};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Represents errors while setting up or shutting down tracing.
#[derive(Error, Debug)]
pub enum TracingError {
    #[error("logging config error: {0}")]
    Logs(#[from] LoggingConfigError),
    #[error("could not start tracing: {0}")]
    Init(String),
    #[error("OpenTelemetry initialization error: {0}")]
    Otel(#[from] OtelProviderBuildError),
}

/// Defines the behavior required to initialize a tracer.
pub trait Tracer {
    fn try_init(&self, layers: Vec<LayerBox>) -> Result<(), TracingError>;
}

/// Represents a registry layer to report tracing data to any destination.
/// Check [tracing_subscriber::Layer] and [tracing_subscriber::Registry] for
/// details.
pub type LayerBox = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Type to represent any [Tracer] whose type will be known at runtime.
pub type TracerBox = Box<dyn Tracer>;

/// Initializes tracing as set up in the provided configuration: the stdout
/// log layer is always on, and when the OpenTelemetry export is configured
/// its providers are registered globally and the corresponding layers are
/// added to the subscriber.
///
/// This must run exactly once per process, before any instrumented code:
/// the global subscriber can only be installed once and a second call fails.
/// The returned tracer shuts the OpenTelemetry providers down on drop,
/// flushing pending telemetry, so it has to be kept alive while the
/// application reports instrumentation.
pub fn try_init_tracing(config: InstrumentationConfig) -> Result<TracerBox, TracingError> {
    let mut layers = Vec::from([logs::layers::stdout(&config.logs)?]);
    let mut tracer: TracerBox = Box::new(SubscriberTracer {});

    if let Some(otel_config) = config.opentelemetry.as_ref() {
        let otel_providers = OtelProviders::try_build(otel_config)?;

        let mut otel_layers = otel_providers.tracing_layers();
        layers.append(&mut otel_layers);

        tracer = Box::new(OtelTracer::new(tracer, otel_providers));
    }

    tracer.try_init(layers)?;
    debug!("Tracer initialized successfully");

    Ok(tracer)
}

/// Implements a [Tracer] that registers a set of layers globally through
/// [tracing_subscriber].
struct SubscriberTracer {}

impl Tracer for SubscriberTracer {
    fn try_init(&self, layers: Vec<LayerBox>) -> Result<(), TracingError> {
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .map_err(|err| TracingError::Init(format!("unable to set global tracer: {err}")))?;

        Ok(())
    }
}

/// Extends a [Tracer] with [OtelProviders]. The OpenTelemetry providers will
/// be registered globally on initialization and shut down when the instance
/// is dropped.
struct OtelTracer {
    inner_tracer: TracerBox,
    otel_providers: Option<OtelProviders>,
}

impl OtelTracer {
    fn new(tracer: TracerBox, otel_providers: OtelProviders) -> Self {
        Self {
            inner_tracer: tracer,
            otel_providers: Some(otel_providers),
        }
    }
}

impl Tracer for OtelTracer {
    fn try_init(&self, layers: Vec<LayerBox>) -> Result<(), TracingError> {
        if let Some(otel_providers) = self.otel_providers.as_ref() {
            otel_providers.set_global()
        }
        self.inner_tracer.try_init(layers)
    }
}

impl Drop for OtelTracer {
    fn drop(&mut self) {
        if let Some(otel_providers) = self.otel_providers.take() {
            let _ = otel_providers.shutdown().inspect_err(
                |err| tracing::error!(%err, "error shutting down the OpenTelemetry providers"),
            );
        }
    }
}
