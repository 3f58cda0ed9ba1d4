//! Parameter sweeps driven through the Indra rendering service.
//!
//! A sweep takes a base manifest, sets one preset field to each value in an
//! ordered list, renders once per value, and records the returned metrics as
//! one CSV row per value.
//!
//! # Quick Start
//!
//! ```no_run
//! use indra_client::IndraClient;
//! use indra_experiments::{run_sweep, SweepPlan, SweepReport};
//!
//! let client = IndraClient::with_defaults()?;
//! let plan = SweepPlan::blend_sweep(".");
//! let mut report = SweepReport::create(plan.report_path())?;
//! let summary = run_sweep(&client, &plan, &mut report)?;
//! report.finish()?;
//! println!("{} rows written", summary.rows_written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`manifest`]: manifest loading, preset mutation, temporary manifest files
//! - [`metrics`]: render metrics and report rows
//! - [`report`]: CSV report sink
//! - [`runner`]: precondition checks and the sequential sweep loop

pub mod error;
pub mod manifest;
pub mod metrics;
pub mod report;
pub mod runner;

pub use error::{ManifestError, SweepError};
pub use manifest::PresetField;
pub use metrics::{RenderMetrics, SweepRow};
pub use report::{SweepReport, REPORT_FILE_NAME, REPORT_HEADER};
pub use runner::{
    check_preconditions, run_points, run_sweep, RenderBackend, SweepPlan, SweepSummary,
    DEFAULT_BLENDS,
};
