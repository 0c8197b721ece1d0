//! Instrumentation bootstrap for the sample: configuration loading, OTLP
//! exporter construction and global provider registration.

pub mod config;
pub mod logs;
pub mod otel;
pub mod tracing;
