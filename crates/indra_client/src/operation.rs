//! Fixed table of service operations: paths, required keys, payload defaults.

use serde_json::Value;

use crate::error::ClientError;
use crate::transport::Method;
use crate::Payload;

/// Bit depth sent with `render` when the caller does not choose one.
pub const DEFAULT_BIT_DEPTH: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Health,
    Render,
    Simulate,
    Capture,
    ValidateManifest,
}

/// Key-presence rule checked against a payload before it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    None,
    AllOf(&'static [&'static str]),
    AnyOf(&'static [&'static str]),
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Health => "health",
            Operation::Render => "render",
            Operation::Simulate => "simulate",
            Operation::Capture => "capture",
            Operation::ValidateManifest => "validateManifest",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Operation::Health => "/health",
            Operation::Render => "/render",
            Operation::Simulate => "/simulate",
            Operation::Capture => "/capture",
            Operation::ValidateManifest => "/manifest/validate",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Operation::Health => Method::Get,
            _ => Method::Post,
        }
    }

    pub fn requirement(self) -> Requirement {
        match self {
            Operation::Health => Requirement::None,
            Operation::Render | Operation::Capture => Requirement::AllOf(&["input", "output"]),
            Operation::Simulate => Requirement::AllOf(&["input"]),
            Operation::ValidateManifest => Requirement::AnyOf(&["manifest", "manifestPath"]),
        }
    }

    /// Check key presence only; values are left for the server to judge.
    pub fn validate(self, payload: &Payload) -> Result<(), ClientError> {
        match self.requirement() {
            Requirement::None => Ok(()),
            Requirement::AllOf(keys) => {
                let missing: Vec<String> = keys
                    .iter()
                    .filter(|key| !payload.contains_key(**key))
                    .map(|key| key.to_string())
                    .collect();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(self.validation_error("keys", missing))
                }
            }
            Requirement::AnyOf(keys) => {
                if keys.iter().any(|key| payload.contains_key(*key)) {
                    Ok(())
                } else {
                    let missing = keys.iter().map(|key| key.to_string()).collect();
                    Err(self.validation_error("one of", missing))
                }
            }
        }
    }

    /// Copy of `payload` with operation defaults filled in. The caller's map is untouched.
    pub fn prepare(self, payload: &Payload) -> Payload {
        let mut body = payload.clone();
        if self == Operation::Render {
            body.entry("bitDepth")
                .or_insert(Value::from(DEFAULT_BIT_DEPTH));
        }
        body
    }

    fn validation_error(self, requirement: &'static str, missing: Vec<String>) -> ClientError {
        ClientError::Validation {
            operation: self.name(),
            requirement,
            missing,
        }
    }
}
