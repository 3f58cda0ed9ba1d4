//! Sweep the `balanced-optics` compositor blend and write a metrics CSV.
//!
//! Needs a running Indra REST server and an input image at
//! `<root>/assets/sample-input.png` (or `--input`).

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indra_client::config::{parse_timeout_secs, BASE_URL_ENV, TIMEOUT_SECS_ENV};
use indra_client::{ClientConfig, IndraClient, DEFAULT_BASE_URL};
use indra_experiments::manifest::BALANCED_OPTICS_PRESET;
use indra_experiments::{check_preconditions, run_points, SweepPlan, SweepReport, DEFAULT_BLENDS};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "blend_sweep",
    about = "Render a compositor blend sweep and collect metrics into a CSV report"
)]
struct Cli {
    /// Base URL of the rendering service
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Per-request timeout in seconds
    #[arg(long, env = TIMEOUT_SECS_ENV, default_value = "60", value_parser = parse_timeout)]
    timeout_secs: Duration,
    /// Project root holding `assets/`, `public/` and `artifacts/`
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Base manifest (defaults to `<root>/public/sample-manifest.json`)
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// Input image (defaults to `<root>/assets/sample-input.png`)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory for renders and the report (defaults to `<root>/artifacts`)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Preset whose compositor blend is swept
    #[arg(long, default_value = BALANCED_OPTICS_PRESET)]
    preset: String,
    /// Blend values, in sweep order
    #[arg(long = "blend", value_delimiter = ',')]
    blends: Vec<f64>,
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    parse_timeout_secs(raw).map_err(|err| err.to_string())
}

impl Cli {
    fn plan(&self) -> SweepPlan {
        let mut plan = SweepPlan::blend_sweep(&self.root);
        if let Some(manifest) = &self.manifest {
            plan.manifest_path = manifest.clone();
        }
        if let Some(input) = &self.input {
            plan.input = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            plan.output_dir = output_dir.clone();
        }
        plan.field.preset_id = self.preset.clone();
        plan.values = if self.blends.is_empty() {
            DEFAULT_BLENDS.to_vec()
        } else {
            self.blends.clone()
        };
        plan
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let plan = cli.plan();
    let config = ClientConfig::default()
        .with_base_url(cli.base_url.as_str())
        .with_timeout(cli.timeout_secs);
    let client = IndraClient::new(config)?;

    check_preconditions(&client, &plan)?;

    let report_path = plan.report_path();
    let mut report = SweepReport::create(&report_path)?;
    info!(
        values = plan.values.len(),
        preset = %plan.field.preset_id,
        report = %report_path.display(),
        "starting sweep"
    );

    match run_points(&client, &plan, &mut report) {
        Ok(summary) => {
            report.finish()?;
            println!(
                "Sweep complete. {} rows written to {}",
                summary.rows_written,
                report_path.display()
            );
            Ok(())
        }
        Err(err) => {
            // The sweep error is what gets returned; a failed close is only logged.
            if let Err(finish_err) = report.finish() {
                warn!(error = %finish_err, report = %report_path.display(), "failed to close report");
            }
            error!(error = %err, report = %report_path.display(), "sweep aborted");
            Err(err.into())
        }
    }
}
