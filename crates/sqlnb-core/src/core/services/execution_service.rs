//! Execution service: runs one notebook cell end to end.

use super::types::CellOutcome;
use crate::AppError;
use crate::api::client::StatementExecutor;
use crate::core::connection::ActiveConnection;
use crate::core::messages::{Message, collect_messages};
use crate::core::result_model::{self, ResultSet};
use crate::display::display_options::RenderOptions;
use crate::display::output::{CellOutput, OutputItem};
use crate::display::plain_text::{context_prefix, render_plain_text};
use crate::display::view::ViewComposer;
use crate::error::ExecutionError;
use std::time::Instant;

/// Runs statement batches through an executor and renders what comes back.
pub struct ExecutionService<E: StatementExecutor> {
    executor: E,
    composer: ViewComposer,
}

impl<E: StatementExecutor> ExecutionService<E> {
    pub fn new(executor: E, options: RenderOptions) -> Self {
        Self {
            executor,
            composer: ViewComposer::new(options),
        }
    }

    /// Service rendering through `composer`, e.g. one sharing a page-wide
    /// [`crate::display::ViewSequence`] with other services.
    pub fn with_composer(executor: E, composer: ViewComposer) -> Self {
        Self { executor, composer }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn options(&self) -> &RenderOptions {
        self.composer.options()
    }

    /// Execute `sql` and produce the cell's outputs.
    ///
    /// The connection is checked before the text, so a blank cell without a
    /// connection still reports the missing connection. A failed batch yields
    /// a single error output and nothing else.
    pub async fn execute_cell(
        &self,
        sql: &str,
        connection: Option<&ActiveConnection>,
    ) -> CellOutcome {
        let Some(connection) = connection else {
            return CellOutcome::failed(&ExecutionError::NoActiveConnection.to_string());
        };

        let sql = sql.trim();
        if sql.is_empty() {
            log::debug!("skipping blank cell");
            return CellOutcome::empty();
        }

        let started = Instant::now();
        let batch = match self
            .executor
            .execute_statement_batch(&connection.id, &connection.batch_sql(sql))
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                log::debug!("statement batch failed: {}", e);
                return CellOutcome::failed(&e.to_string());
            }
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let result_sets = result_model::build(&batch.result_sets, &batch.rows_affected, elapsed_ms);
        let messages = collect_messages(&batch.messages, &batch.rows_affected);
        log::debug!(
            "batch on '{}' finished in {}ms: {} result set(s), {} message(s)",
            connection.id,
            elapsed_ms,
            result_sets.len(),
            messages.len()
        );

        match self.render_outputs(&result_sets, &messages, connection) {
            Ok(outputs) => CellOutcome::succeeded(outputs, result_sets),
            Err(e) => CellOutcome::failed(&e.display_friendly()),
        }
    }

    fn render_outputs(
        &self,
        result_sets: &[ResultSet],
        messages: &[Message],
        connection: &ActiveConnection,
    ) -> Result<Vec<CellOutput>, AppError> {
        let connection_label = connection.connection_label();
        let database_label = connection.database_label();
        let context = context_prefix(&connection_label, &database_label);
        let last = result_sets.len().saturating_sub(1);

        result_sets
            .iter()
            .enumerate()
            .map(|(index, result)| {
                let view_messages: &[Message] = if index == last { messages } else { &[] };
                let view = self.composer.compose_view(
                    result,
                    &connection_label,
                    &database_label,
                    view_messages,
                );

                let mut items = vec![OutputItem::html(view.to_html())];
                if result.is_tabular() {
                    items.push(OutputItem::result(result)?);
                }
                items.push(OutputItem::text(render_plain_text(
                    result,
                    &context,
                    self.composer.options(),
                )));
                Ok(CellOutput::new(items))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::RecordedExecutor;
    use crate::api::models::{RawBatch, RawColumn, RawMessage, RawResultSet};
    use crate::display::output::{MIME_ERROR, MIME_HTML, MIME_RESULT, MIME_TEXT};
    use crate::display::scope::ViewSequence;
    use crate::storage::config::ConnectionProfile;
    use serde_json::{Map, Value, json};

    fn connection() -> ActiveConnection {
        ActiveConnection::new(
            "local",
            ConnectionProfile {
                name: "Local".to_string(),
                server: "localhost".to_string(),
                port: None,
                database: "master".to_string(),
            },
        )
    }

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    fn people() -> RawResultSet {
        RawResultSet {
            columns: vec![RawColumn::new("id", Some("int")), RawColumn::new("name", Some("varchar"))],
            rows: vec![
                row(json!({"id": 1, "name": "Alice"})),
                row(json!({"id": 2, "name": null})),
            ],
        }
    }

    fn mimes(output: &CellOutput) -> Vec<&str> {
        output.items.iter().map(|item| item.mime.as_str()).collect()
    }

    fn service(executor: RecordedExecutor) -> ExecutionService<RecordedExecutor> {
        ExecutionService::new(executor, RenderOptions::default())
    }

    #[tokio::test]
    async fn test_blank_sql_produces_nothing() {
        let service = service(RecordedExecutor::succeeding(RawBatch::default()));
        let outcome = service.execute_cell("  \n\t", Some(&connection())).await;
        assert!(outcome.success);
        assert!(outcome.outputs.is_empty());
        assert!(service.executor().received_sql().is_empty());
    }

    #[tokio::test]
    async fn test_missing_connection_is_an_error() {
        let service = service(RecordedExecutor::succeeding(RawBatch::default()));
        let outcome = service.execute_cell("SELECT 1", None).await;
        assert!(!outcome.success);
        assert!(
            outcome
                .error_message()
                .unwrap()
                .starts_with("No active connection.")
        );
        assert!(service.executor().received_sql().is_empty());
    }

    #[tokio::test]
    async fn test_blank_sql_without_connection_reports_connection() {
        let service = service(RecordedExecutor::succeeding(RawBatch::default()));
        let outcome = service.execute_cell("   ", None).await;
        assert!(!outcome.success);
        assert!(
            outcome
                .error_message()
                .unwrap()
                .starts_with("No active connection.")
        );
    }

    #[tokio::test]
    async fn test_sql_is_trimmed_before_execution() {
        let service = service(RecordedExecutor::succeeding(RawBatch::default()));
        service
            .execute_cell("\n  SELECT 1;  \n", Some(&connection()))
            .await;
        assert_eq!(service.executor().received_sql(), vec!["SELECT 1;"]);
    }

    #[tokio::test]
    async fn test_services_sharing_a_sequence_emit_distinct_roots() {
        let sequence = ViewSequence::default();
        let batch = RawBatch {
            result_sets: vec![people()],
            ..Default::default()
        };
        let left = ExecutionService::with_composer(
            RecordedExecutor::succeeding(batch.clone()),
            ViewComposer::with_sequence(RenderOptions::default(), sequence.clone()),
        );
        let right = ExecutionService::with_composer(
            RecordedExecutor::succeeding(batch),
            ViewComposer::with_sequence(RenderOptions::default(), sequence),
        );

        let first = left.execute_cell("SELECT 1", Some(&connection())).await;
        let second = right.execute_cell("SELECT 2", Some(&connection())).await;
        assert!(first.outputs[0].item(MIME_HTML).unwrap().data.contains("id=\"sqlnb-v1\""));
        assert!(second.outputs[0].item(MIME_HTML).unwrap().data.contains("id=\"sqlnb-v2\""));
    }

    #[tokio::test]
    async fn test_batch_failure_renders_only_an_error() {
        let service = service(RecordedExecutor::failing("Invalid column name 'nme'."));
        let outcome = service.execute_cell("SELECT nme FROM t", Some(&connection())).await;
        assert!(!outcome.success);
        assert_eq!(outcome.outputs.len(), 1);
        assert_eq!(mimes(&outcome.outputs[0]), vec![MIME_ERROR]);
        assert!(outcome.result_sets.is_empty());
        assert_eq!(
            outcome.error_message().as_deref(),
            Some("Invalid column name 'nme'.")
        );
    }

    #[tokio::test]
    async fn test_tabular_batch_outputs() {
        let batch = RawBatch {
            result_sets: vec![people()],
            ..Default::default()
        };
        let service = service(RecordedExecutor::succeeding(batch));
        let outcome = service.execute_cell("SELECT * FROM people", Some(&connection())).await;

        assert!(outcome.success);
        assert_eq!(outcome.outputs.len(), 1);
        let output = &outcome.outputs[0];
        assert_eq!(mimes(output), vec![MIME_HTML, MIME_RESULT, MIME_TEXT]);

        let structured: Value =
            serde_json::from_str(&output.item(MIME_RESULT).unwrap().data).unwrap();
        assert_eq!(structured["rowCount"], 2);
        assert_eq!(structured["rows"][1], json!({"id": 2, "name": null}));

        let text = &output.item(MIME_TEXT).unwrap().data;
        assert!(text.contains("[Local (localhost) / master] 2 row(s) returned in"));

        let html = &output.item(MIME_HTML).unwrap().data;
        assert!(html.contains("Local (localhost) / master"));
        assert!(html.contains("2 row(s) · "));
    }

    #[tokio::test]
    async fn test_affected_rows_only_batch() {
        let batch = RawBatch {
            result_sets: vec![RawResultSet::default()],
            rows_affected: vec![1, 2],
            ..Default::default()
        };
        let service = service(RecordedExecutor::succeeding(batch));
        let outcome = service.execute_cell("UPDATE t SET x = 1", Some(&connection())).await;

        assert_eq!(outcome.outputs.len(), 1);
        let output = &outcome.outputs[0];
        assert_eq!(mimes(output), vec![MIME_HTML, MIME_TEXT]);
        assert_eq!(outcome.result_sets[0].row_count, 3);

        let html = &output.item(MIME_HTML).unwrap().data;
        assert!(html.contains("Query executed successfully. 3 row(s) affected."));
        assert!(html.contains("Messages (2)"));
        assert!(html.contains("(1 row(s) affected)"));
    }

    #[tokio::test]
    async fn test_messages_attach_to_last_result_only() {
        let batch = RawBatch {
            result_sets: vec![people(), people()],
            messages: vec![RawMessage {
                text: "Warning: Null value is eliminated".to_string(),
                severity: Some("warning".to_string()),
            }],
            rows_affected: vec![2, 2],
        };
        let service = service(RecordedExecutor::succeeding(batch));
        let outcome = service.execute_cell("SELECT 1; SELECT 2", Some(&connection())).await;

        assert_eq!(outcome.outputs.len(), 2);
        let first = &outcome.outputs[0].item(MIME_HTML).unwrap().data;
        let last = &outcome.outputs[1].item(MIME_HTML).unwrap().data;
        assert!(!first.contains("Messages ("));
        assert!(last.contains("Messages (3)"));
        assert_eq!(
            outcome.result_sets[0].execution_time_ms,
            outcome.result_sets[1].execution_time_ms
        );
    }

    #[tokio::test]
    async fn test_views_of_one_cell_have_distinct_roots() {
        let batch = RawBatch {
            result_sets: vec![people(), people()],
            ..Default::default()
        };
        let service = service(RecordedExecutor::succeeding(batch));
        let outcome = service.execute_cell("SELECT 1; SELECT 2", Some(&connection())).await;

        let first = &outcome.outputs[0].item(MIME_HTML).unwrap().data;
        let second = &outcome.outputs[1].item(MIME_HTML).unwrap().data;
        assert!(first.contains("id=\"sqlnb-v1\""));
        assert!(second.contains("id=\"sqlnb-v2\""));
        assert!(!second.contains("sqlnb-v1-"));
    }

    #[tokio::test]
    async fn test_selected_database_is_prefixed() {
        let service = service(RecordedExecutor::succeeding(RawBatch::default()));
        let connection = connection().with_database(Some("sales".to_string()));
        service.execute_cell("SELECT 1", Some(&connection)).await;
        assert_eq!(
            service.executor().received_sql(),
            vec!["USE [sales];\nSELECT 1"]
        );
    }
}
