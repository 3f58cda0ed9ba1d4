//! Blocking HTTP client for the local Indra rendering service.
//!
//! The service exposes a small JSON API (`/health`, `/render`, `/simulate`,
//! `/capture`, `/manifest/validate`). Every reply is an envelope with a
//! `status` discriminator; this crate checks required payload keys before any
//! I/O, sends the request, and turns the envelope into either the result
//! fields or a typed [`ClientError`].
//!
//! ```no_run
//! use indra_client::{ClientConfig, IndraClient, Payload};
//! use serde_json::json;
//!
//! let client = IndraClient::new(ClientConfig::default())?;
//! if client.health() {
//!     let mut payload = Payload::new();
//!     payload.insert("input".into(), json!("assets/sample-input.png"));
//!     payload.insert("output".into(), json!("artifacts/render.png"));
//!     let result = client.render(&payload)?;
//!     println!("{:?}", result.get("metrics"));
//! }
//! # Ok::<(), indra_client::ClientError>(())
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod transport;

pub use client::IndraClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ClientError, ConfigError, TransportError};
pub use operation::{Operation, Requirement, DEFAULT_BIT_DEPTH};
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport};

/// JSON object sent to, and returned from, the service.
pub type Payload = serde_json::Map<String, serde_json::Value>;
