#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use indra_client::{ClientError, Payload};
use indra_experiments::{PresetField, RenderBackend, SweepPlan};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Manifest with the swept preset between two neighbours that must stay untouched.
pub fn base_manifest() -> Value {
    json!({
        "version": 1,
        "controls": {
            "presets": [
                {"id": "soft-glow", "panels": {"compositor": {"blend": 0.15}}},
                {"id": "balanced-optics", "panels": {"compositor": {"blend": 0.5}, "optics": {"focus": 2}}},
                {"id": "high-contrast", "panels": {"compositor": {"blend": 0.9}}}
            ]
        }
    })
}

/// Temporary project root holding an input asset and the base manifest.
pub struct Workspace {
    pub root: TempDir,
    pub plan: SweepPlan,
}

impl Workspace {
    pub fn new(values: &[f64]) -> Self {
        let root = tempfile::tempdir().expect("workspace dir");
        let scratch = root.path().join("scratch");
        fs::create_dir_all(&scratch).expect("scratch dir");

        let mut plan = SweepPlan::blend_sweep(root.path());
        plan.values = values.to_vec();
        plan.scratch_dir = Some(scratch);

        fs::create_dir_all(plan.input.parent().expect("assets dir")).expect("assets dir");
        fs::write(&plan.input, b"\x89PNG").expect("input asset");
        fs::create_dir_all(plan.manifest_path.parent().expect("public dir")).expect("public dir");
        fs::write(
            &plan.manifest_path,
            serde_json::to_vec_pretty(&base_manifest()).expect("manifest json"),
        )
        .expect("base manifest");

        Self { root, plan }
    }

    pub fn manifest_on_disk(&self) -> Value {
        let raw = fs::read_to_string(&self.plan.manifest_path).expect("manifest readable");
        serde_json::from_str(&raw).expect("manifest json")
    }

    pub fn scratch_entries(&self) -> Vec<PathBuf> {
        let scratch = self.plan.scratch_dir.as_ref().expect("scratch dir");
        fs::read_dir(scratch)
            .expect("scratch readable")
            .map(|entry| entry.expect("dir entry").path())
            .collect()
    }
}

/// What the backend saw for one render call.
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub payload: Payload,
    pub manifest_path: PathBuf,
    pub manifest_existed: bool,
    pub manifest: Value,
}

/// Backend double answering with metrics derived from the manifest's blend:
/// `{indraIndex: b, rimMean: b * 2, coherenceMean: b * 3}`.
pub struct ScriptedBackend {
    pub healthy: bool,
    /// 1-based call number that fails with a remote error.
    pub fail_on_call: Option<usize>,
    pub calls: RefCell<Vec<RenderCall>>,
}

impl ScriptedBackend {
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            fail_on_call: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::healthy()
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::healthy()
        }
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.borrow().clone()
    }
}

pub fn swept_blend(manifest: &Value) -> f64 {
    let field = PresetField::balanced_blend();
    manifest["controls"]["presets"]
        .as_array()
        .expect("presets")
        .iter()
        .find(|preset| preset["id"] == field.preset_id.as_str())
        .and_then(|preset| preset["panels"][&field.panel][&field.field].as_f64())
        .expect("blend present")
}

impl RenderBackend for ScriptedBackend {
    fn endpoint(&self) -> String {
        "http://127.0.0.1:8787".to_string()
    }

    fn is_healthy(&self) -> bool {
        self.healthy
    }

    fn render(&self, payload: &Payload) -> Result<Payload, ClientError> {
        let manifest_path = PathBuf::from(
            payload["manifest"]
                .as_str()
                .expect("manifest path in payload"),
        );
        let manifest_existed = Path::new(&manifest_path).exists();
        let manifest: Value = serde_json::from_str(
            &fs::read_to_string(&manifest_path).expect("temporary manifest readable"),
        )
        .expect("temporary manifest json");

        let mut calls = self.calls.borrow_mut();
        calls.push(RenderCall {
            payload: payload.clone(),
            manifest_path,
            manifest_existed,
            manifest: manifest.clone(),
        });

        if self.fail_on_call == Some(calls.len()) {
            return Err(ClientError::Remote {
                operation: "render",
                message: "render node crashed".to_string(),
            });
        }

        let blend = swept_blend(&manifest);
        let result = json!({
            "output": payload["output"],
            "metrics": {"indraIndex": blend, "rimMean": blend * 2.0, "coherenceMean": blend * 3.0}
        });
        match result {
            Value::Object(map) => Ok(map),
            _ => unreachable!(),
        }
    }
}
