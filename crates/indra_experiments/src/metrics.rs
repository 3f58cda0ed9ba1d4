use indra_client::Payload;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SweepError;

/// Metrics the service reports under `metrics` in a render result.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMetrics {
    pub indra_index: f64,
    pub rim_mean: f64,
    pub coherence_mean: f64,
}

impl RenderMetrics {
    /// Pull the metrics object out of a render result for sweep value `value`.
    pub fn from_result(value: f64, result: &Payload) -> Result<Self, SweepError> {
        let metrics = result.get("metrics").cloned().unwrap_or(Value::Null);
        serde_json::from_value(metrics).map_err(|source| SweepError::Metrics { value, source })
    }
}

/// One report line; field order is the CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub blend: f64,
    pub indra_index: f64,
    pub rim_mean: f64,
    pub coherence_mean: f64,
}

impl SweepRow {
    pub fn new(value: f64, metrics: RenderMetrics) -> Self {
        Self {
            blend: value,
            indra_index: metrics.indra_index,
            rim_mean: metrics.rim_mean,
            coherence_mean: metrics.coherence_mean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn reads_camel_case_metrics_and_ignores_extras() {
        let payload = result(json!({
            "output": "render_0.30.png",
            "metrics": {"indraIndex": 0.82, "rimMean": 0.31, "coherenceMean": 0.67, "edgeMax": 4.0}
        }));
        let metrics = RenderMetrics::from_result(0.3, &payload).expect("metrics present");
        assert_eq!(
            SweepRow::new(0.3, metrics),
            SweepRow {
                blend: 0.3,
                indra_index: 0.82,
                rim_mean: 0.31,
                coherence_mean: 0.67,
            }
        );
    }

    #[test]
    fn missing_metric_is_an_error() {
        let payload = result(json!({"metrics": {"indraIndex": 0.82, "rimMean": 0.31}}));
        let error = RenderMetrics::from_result(0.4, &payload).expect_err("coherenceMean missing");
        assert!(matches!(error, SweepError::Metrics { value, .. } if value == 0.4));
    }

    #[test]
    fn missing_metrics_object_is_an_error() {
        let payload = result(json!({"output": "render_0.50.png"}));
        assert!(RenderMetrics::from_result(0.5, &payload).is_err());
    }
}
