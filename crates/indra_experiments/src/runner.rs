//! Sequential sweep execution.
//!
//! Points run one at a time in declared order. The first failing point stops
//! the sweep; rows already appended stay in the report.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indra_client::{ClientError, IndraClient, Payload, Transport};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::SweepError;
use crate::manifest::{
    apply_preset_value, discard_temp_manifest, load_manifest, write_temp_manifest, PresetField,
};
use crate::metrics::{RenderMetrics, SweepRow};
use crate::report::{SweepReport, REPORT_FILE_NAME};

pub const DEFAULT_BLENDS: [f64; 5] = [0.3, 0.4, 0.5, 0.6, 0.7];

/// The part of the service a sweep needs.
pub trait RenderBackend {
    /// Where the backend lives, for error messages.
    fn endpoint(&self) -> String;
    fn is_healthy(&self) -> bool;
    fn render(&self, payload: &Payload) -> Result<Payload, ClientError>;
}

impl<T: Transport> RenderBackend for IndraClient<T> {
    fn endpoint(&self) -> String {
        self.base_url().to_string()
    }

    fn is_healthy(&self) -> bool {
        self.health()
    }

    fn render(&self, payload: &Payload) -> Result<Payload, ClientError> {
        IndraClient::render(self, payload)
    }
}

/// Everything a sweep reads from or writes to, plus the values to try.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    pub input: PathBuf,
    pub manifest_path: PathBuf,
    pub output_dir: PathBuf,
    pub field: PresetField,
    pub values: Vec<f64>,
    /// Directory for temporary manifests; the system temp dir when `None`.
    pub scratch_dir: Option<PathBuf>,
}

impl SweepPlan {
    /// Compositor blend sweep over [`DEFAULT_BLENDS`] laid out under `root`.
    pub fn blend_sweep(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            input: root.join("assets").join("sample-input.png"),
            manifest_path: root.join("public").join("sample-manifest.json"),
            output_dir: root.join("artifacts"),
            field: PresetField::balanced_blend(),
            values: DEFAULT_BLENDS.to_vec(),
            scratch_dir: None,
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    /// Render target for one sweep value, distinct per value.
    ///
    /// Values with at most two decimals keep the `render_0.30.png` form;
    /// anything finer uses the shortest exact representation.
    pub fn output_path_for(&self, value: f64) -> PathBuf {
        self.output_dir
            .join(format!("render_{}.png", format_sweep_value(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub rows_written: usize,
    pub values_total: usize,
}

/// Fail fast when the input asset is absent or the backend is not healthy.
pub fn check_preconditions<B: RenderBackend>(
    backend: &B,
    plan: &SweepPlan,
) -> Result<(), SweepError> {
    if !plan.input.exists() {
        return Err(SweepError::MissingInput(plan.input.clone()));
    }
    if !backend.is_healthy() {
        return Err(SweepError::ServiceUnreachable(backend.endpoint()));
    }
    Ok(())
}

/// Check preconditions once, then run every point.
pub fn run_sweep<B: RenderBackend, W: Write>(
    backend: &B,
    plan: &SweepPlan,
    report: &mut SweepReport<W>,
) -> Result<SweepSummary, SweepError> {
    check_preconditions(backend, plan)?;
    run_points(backend, plan, report)
}

/// Run each value in order, appending one row per successful point.
pub fn run_points<B: RenderBackend, W: Write>(
    backend: &B,
    plan: &SweepPlan,
    report: &mut SweepReport<W>,
) -> Result<SweepSummary, SweepError> {
    fs::create_dir_all(&plan.output_dir).map_err(|source| SweepError::Io {
        path: plan.output_dir.clone(),
        source,
    })?;

    let mut rows_written = 0;
    for (index, &value) in plan.values.iter().enumerate() {
        let row = run_point(backend, plan, value)?;
        report.append(&row)?;
        rows_written += 1;
        info!(
            point = index + 1,
            total = plan.values.len(),
            value,
            indra_index = row.indra_index,
            rim_mean = row.rim_mean,
            coherence_mean = row.coherence_mean,
            "sweep point complete"
        );
    }

    Ok(SweepSummary {
        rows_written,
        values_total: plan.values.len(),
    })
}

fn run_point<B: RenderBackend>(
    backend: &B,
    plan: &SweepPlan,
    value: f64,
) -> Result<SweepRow, SweepError> {
    let mut document = load_manifest(&plan.manifest_path)?;
    apply_preset_value(&mut document, &plan.field, value)?;

    // Dropping `manifest` on any early return also removes the file.
    let manifest = write_temp_manifest(&document, plan.scratch_dir.as_deref())?;
    let payload = render_payload(plan, value, &manifest);
    debug!(value, manifest = %manifest.display(), "rendering sweep point");

    let result = backend.render(&payload);
    discard_temp_manifest(manifest);

    let result = result.map_err(|source| SweepError::Render { value, source })?;
    let metrics = RenderMetrics::from_result(value, &result)?;
    Ok(SweepRow::new(value, metrics))
}

fn render_payload(plan: &SweepPlan, value: f64, manifest: &Path) -> Payload {
    let mut payload = Payload::new();
    payload.insert("input".into(), path_value(&plan.input));
    payload.insert("output".into(), path_value(&plan.output_path_for(value)));
    payload.insert("manifest".into(), path_value(manifest));
    payload.insert("preset".into(), Value::from(plan.field.preset_id.clone()));
    payload
}

fn format_sweep_value(value: f64) -> String {
    let fixed = format!("{value:.2}");
    if fixed.parse::<f64>() == Ok(value) {
        fixed
    } else {
        value.to_string()
    }
}

fn path_value(path: &Path) -> Value {
    Value::from(path.to_string_lossy().into_owned())
}
