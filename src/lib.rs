//! # Travel assistant observability sample
//!
//! This library wires a demo travel-assistant agent to an OTLP-compatible
//! observability backend. The interesting part is the bootstrap: endpoint and
//! credentials are loaded from the environment and a token file, OTLP
//! exporters are built from that configuration and registered as the global
//! OpenTelemetry providers before the assistant handles its payload.

pub mod assistant;
pub mod cli;
pub mod defaults;
pub mod http;
pub mod instrumentation;
pub mod secrets_provider;
