use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Raw batch models as handed over by the database client

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RawColumn {
    pub name: String,
    #[serde(alias = "declaredType", alias = "type", default)]
    pub declared_type: Option<String>,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, declared_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RawResultSet {
    #[serde(default)]
    pub columns: Vec<RawColumn>,
    /// Driver rows keyed by column name; key sets are not trusted.
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RawMessage {
    pub text: String,
    #[serde(alias = "type", default)]
    pub severity: Option<String>,
}

/// Everything one `executeStatementBatch` call produced.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RawBatch {
    #[serde(alias = "resultSets", alias = "recordsets", default)]
    pub result_sets: Vec<RawResultSet>,
    #[serde(default)]
    pub messages: Vec<RawMessage>,
    #[serde(alias = "rowsAffected", default)]
    pub rows_affected: Vec<u64>,
}
