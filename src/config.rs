// src/config.rs
use serde::{Deserialize, Serialize};

/// Knobs for a single compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOptions {
    /// Reconcile states on the rayon pool instead of one after another.
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Put each state's rules into canonical order after reconciliation.
    #[serde(default = "default_true")]
    pub sort: bool,
    /// Padding for the base/pattern/target columns when rendering.
    #[serde(default = "default_column_width")]
    pub column_width: usize,
}

fn default_true() -> bool {
    true
}

fn default_column_width() -> usize {
    9
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            sort: true,
            column_width: default_column_width(),
        }
    }
}

impl CompileOptions {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn from_json_bytes(data: &[u8]) -> Result<Self, String> {
        serde_json::from_slice(data).map_err(|e| format!("Failed to parse options JSON: {e}"))
    }
}
