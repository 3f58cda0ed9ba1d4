use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::ClientError;
use crate::operation::Operation;
use crate::transport::{ApiRequest, HttpTransport, Transport};
use crate::Payload;


/// Client for one Indra service instance.
///
/// Every operation except [`health`](Self::health) validates its payload
/// locally, sends one request, and returns the envelope's result fields.
/// The request timeout belongs to the transport.
#[derive(Debug, Clone)]
pub struct IndraClient<T = HttpTransport> {
    base_url: String,
    transport: T,
}

impl IndraClient<HttpTransport> {
    /// Create a client backed by a blocking HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Client for `http://127.0.0.1:8787` with a 60 second timeout.
    pub fn with_defaults() -> Result<Self, ClientError> {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> IndraClient<T> {
    /// Use `transport` as given. Only `config.base_url` is read; the
    /// transport applies its own timeout.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Probe `/health`. Never fails: unreachable or unexpected replies are `false`.
    pub fn health(&self) -> bool {
        let request = self.request(Operation::Health, None);
        match self.transport.send(&request) {
            Ok(response) => {
                let healthy = envelope::is_healthy(&response);
                debug!(url = %request.url, status = response.status, healthy, "health probe");
                healthy
            }
            Err(err) => {
                debug!(url = %request.url, error = %err, "health probe failed");
                false
            }
        }
    }

    /// Render `input` to `output`. `bitDepth` defaults to 8 when absent.
    pub fn render(&self, payload: &Payload) -> Result<Payload, ClientError> {
        self.call(Operation::Render, payload)
    }

    pub fn simulate(&self, payload: &Payload) -> Result<Payload, ClientError> {
        self.call(Operation::Simulate, payload)
    }

    pub fn capture(&self, payload: &Payload) -> Result<Payload, ClientError> {
        self.call(Operation::Capture, payload)
    }

    /// Validate a manifest given inline (`manifest`) or by path (`manifestPath`).
    pub fn validate_manifest(&self, payload: &Payload) -> Result<Payload, ClientError> {
        self.call(Operation::ValidateManifest, payload)
    }

    fn call(&self, operation: Operation, payload: &Payload) -> Result<Payload, ClientError> {
        operation.validate(payload)?;
        let body = operation.prepare(payload);
        let request = self.request(operation, Some(Value::Object(body)));

        debug!(operation = operation.name(), url = %request.url, "sending request");
        let response = self.transport.send(&request)?;
        debug!(
            operation = operation.name(),
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );

        let envelope = envelope::decode(operation, response)?;
        envelope::expect_ok(operation, envelope)
    }

    fn request(&self, operation: Operation, body: Option<Value>) -> ApiRequest {
        ApiRequest {
            method: operation.method(),
            url: format!("{}{}", self.base_url, operation.path()),
            body,
        }
    }
}
