use crate::core::result_model::ResultSet;
use crate::display::output::{CellOutput, OutputItem};

/// Everything one executed notebook cell produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellOutcome {
    /// One output per result set, or a single error output.
    pub outputs: Vec<CellOutput>,
    /// Normalized result sets behind `outputs`; empty on failure.
    pub result_sets: Vec<ResultSet>,
    pub success: bool,
}

impl CellOutcome {
    /// Nothing to run.
    pub fn empty() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn succeeded(outputs: Vec<CellOutput>, result_sets: Vec<ResultSet>) -> Self {
        Self {
            outputs,
            result_sets,
            success: true,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            outputs: vec![CellOutput::new(vec![OutputItem::error(message)])],
            result_sets: Vec::new(),
            success: false,
        }
    }

    /// Message of the error output, if the cell failed.
    pub fn error_message(&self) -> Option<String> {
        self.outputs
            .iter()
            .flat_map(|output| &output.items)
            .find(|item| item.is_error())
            .and_then(|item| serde_json::from_str::<serde_json::Value>(&item.data).ok())
            .and_then(|value| value["message"].as_str().map(str::to_string))
    }
}
