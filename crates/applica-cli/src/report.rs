//! One fill run over a saved page and the JSON report written for it.

use std::path::{Path, PathBuf};

use applica_fill::{
    ControlState, FieldResolution, FillEngine, FillOptions, FillReport, HtmlDocument,
};
use applica_model::FillOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::logging::redact_value;

/// The `form_data` object inside a profile file.
///
/// Accepts both a backend response (`{"form_data": {...}}`) and a bare record.
pub fn form_data_payload(value: &Value) -> &Value {
    value.get("form_data").unwrap_or(value)
}

/// Everything a fill run produced.
#[derive(Debug, Clone)]
pub struct FillRun {
    pub page: PathBuf,
    pub outcome: FillOutcome,
    /// Absent when `form_data` was rejected before matching.
    pub report: Option<FillReport>,
    pub controls: Vec<ControlState>,
}

/// Serialized form of a [`FillRun`].
#[derive(Debug, Serialize)]
pub struct FillRecord<'a> {
    pub generated_at: String,
    pub page: String,
    pub outcome: &'a FillOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<&'a [FieldResolution]>,
    /// Controls the pass wrote to.
    pub controls: Vec<&'a ControlState>,
}

impl FillRun {
    /// Parses the page and runs one pass with the given payload.
    pub fn execute(page: &Path, html: &str, profile: &Value, options: FillOptions) -> Self {
        let mut document = HtmlDocument::parse(html);
        let engine = FillEngine::new(options);
        let form_data = form_data_payload(profile);
        let (outcome, report) = match engine.try_fill_form_data(&mut document, form_data) {
            Ok(report) => (report.outcome(), Some(report)),
            Err(error) => {
                warn!(page = %page.display(), %error, "profile rejected");
                (FillOutcome::failed(error.to_string()), None)
            }
        };

        let controls = document.control_states();
        for control in controls.iter().filter(|control| control.touched) {
            debug!(
                element = %control.element,
                kind = control.kind.as_str(),
                value = redact_value(control.value.as_deref().unwrap_or_default()),
                checked = ?control.checked,
                "control written"
            );
        }

        Self {
            page: page.to_path_buf(),
            outcome,
            report,
            controls,
        }
    }

    pub fn touched(&self) -> impl Iterator<Item = &ControlState> {
        self.controls.iter().filter(|control| control.touched)
    }

    pub fn record(&self, generated_at: DateTime<Utc>) -> FillRecord<'_> {
        FillRecord {
            generated_at: generated_at.to_rfc3339(),
            page: self.page.display().to_string(),
            outcome: &self.outcome,
            fields: self.report.as_ref().map(|report| report.fields.as_slice()),
            controls: self.touched().collect(),
        }
    }
}
