use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// A single scalar cell of a result grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl CellValue {
    /// Convert a driver value. Composite values are not cell values, so they
    /// are kept as their compact JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => CellValue::Number(n.clone()),
            Value::String(s) => CellValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::String(value.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Text shown for the value; `None` for NULL so callers pick their own marker.
    pub fn display_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::String(s) => Some(s.clone()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Number(n) => Value::Number(n.clone()),
            CellValue::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("NULL"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(Number::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) => n.serialize(serializer),
            CellValue::String(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_convert_directly() {
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(&json!(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from_json(&json!(42)), CellValue::from(42));
        assert_eq!(CellValue::from_json(&json!("x")), CellValue::from("x"));
    }

    #[test]
    fn test_composites_become_json_text() {
        let value = CellValue::from_json(&json!({"a": [1, 2]}));
        assert_eq!(value, CellValue::from(r#"{"a":[1,2]}"#));
    }

    #[test]
    fn test_display_distinguishes_null() {
        assert_eq!(CellValue::Null.display_text(), None);
        assert_eq!(CellValue::from("NULL").display_text().as_deref(), Some("NULL"));
        assert_eq!(CellValue::Null.to_string(), "NULL");
        assert_eq!(CellValue::from_json(&json!(1.5)).to_string(), "1.5");
    }

    #[test]
    fn test_serialize_matches_json() {
        let values = vec![
            CellValue::Null,
            CellValue::from(false),
            CellValue::from(7),
            CellValue::from("s"),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,false,7,"s"]"#);
    }
}
