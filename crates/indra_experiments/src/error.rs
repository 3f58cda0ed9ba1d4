use std::io;
use std::path::PathBuf;

use indra_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("manifest {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("preset {preset_id:?} has a non-object `{key}` entry")]
    UnexpectedShape { preset_id: String, key: String },
    #[error("failed to write temporary manifest")]
    WriteTemp(#[source] io::Error),
    #[error("failed to serialize manifest")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("input asset missing: {}. Create the file before running the sweep", .0.display())]
    MissingInput(PathBuf),
    #[error("render service is not reachable on {0}")]
    ServiceUnreachable(String),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error("render failed for value {value}")]
    Render {
        value: f64,
        #[source]
        source: ClientError,
    },
    #[error("render result for value {value} is missing metrics")]
    Metrics {
        value: f64,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write sweep report")]
    Report(#[from] csv::Error),
    #[error("failed to prepare {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
