//! Output items handed to the display surface.
//!
//! Each executed batch yields a list of items tagged with a MIME type: the
//! interactive fragment, a structured copy of the result set, and a plain-text
//! fallback. A failed batch yields a single error item.

use crate::core::result_model::ResultSet;
use crate::error::{AppError, DisplayError};
use serde::Serialize;
use serde_json::json;

pub const MIME_HTML: &str = "text/html";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_RESULT: &str = "x-application/sql-notebook-result";
pub const MIME_ERROR: &str = "application/vnd.code.notebook.error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputItem {
    pub mime: String,
    pub data: String,
}

impl OutputItem {
    pub fn new(mime: &str, data: impl Into<String>) -> Self {
        Self {
            mime: mime.to_string(),
            data: data.into(),
        }
    }

    pub fn html(markup: impl Into<String>) -> Self {
        Self::new(MIME_HTML, markup)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(MIME_TEXT, text)
    }

    /// Structured copy of a result set: `{columns, rows, rowCount, executionTime}`.
    pub fn result(result: &ResultSet) -> Result<Self, AppError> {
        let data = serde_json::to_string(result)
            .map_err(|e| DisplayError::Serialization(e.to_string()))?;
        Ok(Self::new(MIME_RESULT, data))
    }

    pub fn error(message: &str) -> Self {
        Self::new(
            MIME_ERROR,
            json!({ "name": "Error", "message": message }).to_string(),
        )
    }

    pub fn is_error(&self) -> bool {
        self.mime == MIME_ERROR
    }
}

/// Items rendered for one result set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CellOutput {
    pub items: Vec<OutputItem>,
}

impl CellOutput {
    pub fn new(items: Vec<OutputItem>) -> Self {
        Self { items }
    }

    pub fn item(&self, mime: &str) -> Option<&OutputItem> {
        self.items.iter().find(|item| item.mime == mime)
    }
}
