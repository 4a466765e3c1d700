use opentelemetry::{global, trace::TracerProvider, KeyValue};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{logs::SdkLoggerProvider, trace::SdkTracerProvider, Resource};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// handles to the OTLP exporters, flushed on [`Telemetry::shutdown`].
pub struct Telemetry {
    tracer_provider: Option<SdkTracerProvider>,
    log_provider: Option<SdkLoggerProvider>,
}

impl Telemetry {
    pub fn shutdown(self) {
        if let Some(tracer_provider) = self.tracer_provider {
            if let Err(e) = tracer_provider.shutdown() {
                eprintln!("failed to flush traces: {e:?}");
            }
        }

        if let Some(log_provider) = self.log_provider {
            if let Err(e) = log_provider.shutdown() {
                eprintln!("failed to flush logs: {e:?}");
            }
        }
    }
}

fn init_providers(
    otlp_endpoint: &str,
) -> Result<(SdkTracerProvider, SdkLoggerProvider), Box<dyn std::error::Error + Send + Sync>> {
    let service_name = env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "quotebox".to_string());

    let service_version =
        env::var("OTEL_SERVICE_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    let resource = Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", service_version))
        .build();

    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_endpoint)
        .build()?;

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_endpoint)
        .build()?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();

    let log_provider = SdkLoggerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(log_exporter)
        .build();

    Ok((tracer_provider, log_provider))
}

/// installs the global subscriber.
///
/// logs always go to stderr, so they never mix with quote output. spans and
/// logs are additionally exported over OTLP when `OTEL_EXPORTER_OTLP_ENDPOINT`
/// is set.
pub fn init_telemetry() -> Result<Telemetry, Box<dyn std::error::Error + Send + Sync>> {
    let providers = match env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(otlp_endpoint) => Some(init_providers(&otlp_endpoint)?),
        Err(_) => None,
    };

    let (tracer_provider, log_provider) = match providers {
        Some((tracer_provider, log_provider)) => (Some(tracer_provider), Some(log_provider)),
        None => (None, None),
    };

    if let Some(tracer_provider) = &tracer_provider {
        global::set_tracer_provider(tracer_provider.clone());
    }

    let tracer_layer = tracer_provider
        .as_ref()
        .map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer("quotebox")));
    let logger_layer = log_provider.as_ref().map(OpenTelemetryTracingBridge::new);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracer_layer)
        .with(logger_layer)
        .try_init()?;

    if tracer_provider.is_some() {
        tracing::info!("OpenTelemetry initialized successfully");
    }

    Ok(Telemetry {
        tracer_provider,
        log_provider,
    })
}
