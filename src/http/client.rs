//! # HTTP client for telemetry export
//!
//! Wraps a blocking reqwest client behind the [opentelemetry_http::HttpClient]
//! trait so the OTLP exporters can use it. A blocking client is used on
//! purpose: the batch processors run on their own threads and block on the
//! export future, no async runtime is available there.

use super::config::HttpConfig;
use async_trait::async_trait;
use http::{Request, Response};
use opentelemetry_http::{Bytes, HttpClient as OtelHttpClient, HttpError};
use reqwest::blocking::{Client, ClientBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpBuildError {
    #[error("could not build the reqwest client: {0}")]
    ClientBuilder(String),
}

/// HTTP client used to report telemetry to the OTLP endpoint.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Builds a client according to the provided configuration.
    pub fn new(config: HttpConfig) -> Result<Self, HttpBuildError> {
        let client = ClientBuilder::new()
            .use_rustls_tls()
            .timeout(config.timeout)
            .connect_timeout(config.conn_timeout)
            .build()
            .map_err(|err| HttpBuildError::ClientBuilder(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl OtelHttpClient for HttpClient {
    async fn send_bytes(&self, request: Request<Bytes>) -> Result<Response<Bytes>, HttpError> {
        let request = request.try_into()?;
        let mut response = self.client.execute(request)?;
        let headers = std::mem::take(response.headers_mut());
        let mut http_response = Response::builder()
            .status(response.status())
            .body(response.bytes()?)?;
        *http_response.headers_mut() = headers;
        Ok(http_response)
    }
}
