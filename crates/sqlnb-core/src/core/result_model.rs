//! Normalized result sets.
//!
//! Driver rows arrive as loosely keyed objects. Before anything is rendered
//! they are re-keyed against the declared column list, so every [`Row`] holds
//! exactly one value per column in column order.

use super::value::CellValue;
use crate::api::models::{RawColumn, RawResultSet};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    /// Database-reported type name; display only, empty when unknown.
    #[serde(rename = "type")]
    pub declared_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

impl From<&RawColumn> for Column {
    fn from(raw: &RawColumn) -> Self {
        Column::new(raw.name.clone(), raw.declared_type.clone().unwrap_or_default())
    }
}

/// One result row, positionally aligned with its result set's columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<CellValue>,
}

impl Row {
    pub fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    /// Re-key a driver row against `columns`: unknown keys are dropped and
    /// missing keys become NULL.
    pub fn rekey(columns: &[Column], raw: &Map<String, Value>) -> Self {
        let values = columns
            .iter()
            .map(|column| {
                raw.get(&column.name)
                    .map(CellValue::from_json)
                    .unwrap_or(CellValue::Null)
            })
            .collect();
        Self { values }
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    /// Returned rows for tabular results, affected rows otherwise.
    pub row_count: u64,
    pub execution_time_ms: u64,
}

impl ResultSet {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>, execution_time_ms: u64) -> Self {
        let row_count = rows.len() as u64;
        Self {
            columns,
            rows,
            row_count,
            execution_time_ms,
        }
    }

    /// Outcome of a statement that returned no columns (DDL/DML).
    pub fn affected(row_count: u64, execution_time_ms: u64) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            row_count,
            execution_time_ms,
        }
    }

    pub fn is_tabular(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// A row as a JSON object with keys in column order.
    pub fn row_object(&self, row: &Row) -> Map<String, Value> {
        self.columns
            .iter()
            .zip(row.values())
            .map(|(column, value)| (column.name.clone(), value.to_json()))
            .collect()
    }

    /// All rows as a JSON array of objects, the source of the JSON view.
    pub fn rows_json(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| Value::Object(self.row_object(row)))
                .collect(),
        )
    }
}

struct RowsView<'a> {
    columns: &'a [Column],
    rows: &'a [Row],
}

struct RowView<'a> {
    columns: &'a [Column],
    row: &'a Row,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.row.values()) {
            map.serialize_entry(&column.name, value)?;
        }
        map.end()
    }
}

impl Serialize for RowsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows.iter().map(|row| RowView {
            columns: self.columns,
            row,
        }))
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResultSet", 4)?;
        state.serialize_field("columns", &self.columns)?;
        state.serialize_field(
            "rows",
            &RowsView {
                columns: &self.columns,
                rows: &self.rows,
            },
        )?;
        state.serialize_field("rowCount", &self.row_count)?;
        state.serialize_field("executionTime", &self.execution_time_ms)?;
        state.end()
    }
}

fn unique_columns(raw: &[RawColumn]) -> Vec<Column> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut columns = Vec::with_capacity(raw.len());
    for column in raw {
        if seen.insert(column.name.as_str()) {
            columns.push(Column::from(column));
        } else {
            log::warn!("dropping duplicate column '{}'", column.name);
        }
    }
    columns
}

/// Normalize the raw result sets of one statement batch.
///
/// Result sets without columns are dropped. When nothing column-bearing is
/// left, a single affected-rows result is synthesized from `rows_affected`.
/// Every produced result set carries the same `elapsed_ms`.
pub fn build(raw_sets: &[RawResultSet], rows_affected: &[u64], elapsed_ms: u64) -> Vec<ResultSet> {
    let result_sets: Vec<ResultSet> = raw_sets
        .iter()
        .filter(|raw| !raw.columns.is_empty())
        .map(|raw| {
            let columns = unique_columns(&raw.columns);
            let rows = raw
                .rows
                .iter()
                .map(|row| Row::rekey(&columns, row))
                .collect();
            ResultSet::new(columns, rows, elapsed_ms)
        })
        .collect();

    if result_sets.is_empty() {
        let affected = rows_affected
            .iter()
            .fold(0u64, |acc, n| acc.saturating_add(*n));
        log::debug!("no tabular results; {} row(s) affected", affected);
        return vec![ResultSet::affected(affected, elapsed_ms)];
    }

    log::debug!("built {} tabular result set(s)", result_sets.len());
    result_sets
}
