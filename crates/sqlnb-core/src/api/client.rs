use super::models::RawBatch;
use crate::error::{CliError, ExecutionError};
use async_trait::async_trait;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Seam to the database client that performs all wire-level work.
///
/// Implementations run the whole batch and resolve once every statement has
/// completed. A failure of the batch as a whole is reported as
/// [`ExecutionError::BatchFailed`]; per-statement server messages travel in
/// [`RawBatch::messages`] instead.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute_statement_batch(
        &self,
        connection_id: &str,
        sql: &str,
    ) -> Result<RawBatch, ExecutionError>;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Recording {
    Failure { error: String },
    Success(RawBatch),
}

/// Replays a previously captured batch outcome.
pub struct RecordedExecutor {
    outcome: Result<RawBatch, String>,
    received: Mutex<Vec<String>>,
}

impl RecordedExecutor {
    pub fn succeeding(batch: RawBatch) -> Self {
        Self {
            outcome: Ok(batch),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Parse a recording: either a raw batch or `{ "error": "..." }`.
    pub fn from_json(json: &str) -> Result<Self, ExecutionError> {
        let recording: Recording =
            serde_json::from_str(json).map_err(|e| ExecutionError::InvalidRecording {
                message: e.to_string(),
            })?;

        Ok(match recording {
            Recording::Failure { error } => Self::failing(error),
            Recording::Success(batch) => Self::succeeding(batch),
        })
    }

    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CliError::InputFile {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_json(&content)?)
    }

    /// SQL texts received so far, oldest first.
    pub fn received_sql(&self) -> Vec<String> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl StatementExecutor for RecordedExecutor {
    async fn execute_statement_batch(
        &self,
        connection_id: &str,
        sql: &str,
    ) -> Result<RawBatch, ExecutionError> {
        log::debug!("replaying recorded batch for connection '{}'", connection_id);
        match self.received.lock() {
            Ok(mut received) => received.push(sql.to_string()),
            Err(poisoned) => poisoned.into_inner().push(sql.to_string()),
        }

        self.outcome
            .clone()
            .map_err(|message| ExecutionError::BatchFailed { message })
    }
}
