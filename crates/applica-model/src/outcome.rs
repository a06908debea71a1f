use serde::{Deserialize, Serialize};

/// What the UI shell receives after a fill pass.
///
/// Serializes to `{"filled": n, "total": m}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillOutcome {
    Completed { filled: usize, total: usize },
    Failed { error: String },
}

impl FillOutcome {
    pub fn completed(filled: usize, total: usize) -> Self {
        FillOutcome::Completed { filled, total }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        FillOutcome::Failed {
            error: error.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FillOutcome::Failed { .. })
    }
}
