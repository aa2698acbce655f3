use crate::api::models::RawMessage;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Lenient parse of a driver-reported severity; unknown means info.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Severity::Info;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Severity::Error,
            "warning" | "warn" => Severity::Warning,
            "info" | "information" | "" => Severity::Info,
            other => {
                log::warn!("unknown message severity '{}', treating as info", other);
                Severity::Info
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Leading glyph of a rendered message; info has none.
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            Severity::Info => None,
            Severity::Warning => Some("\u{26A0}"),
            Severity::Error => Some("\u{2716}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    pub fn rows_affected(count: u64) -> Self {
        Self::info(format!("({} row(s) affected)", count))
    }
}

/// Messages of one batch in emission order: server messages first, then one
/// affected-rows line per completed statement.
pub fn collect_messages(raw: &[RawMessage], rows_affected: &[u64]) -> Vec<Message> {
    raw.iter()
        .map(|m| Message::new(m.text.clone(), Severity::parse(m.severity.as_deref())))
        .chain(rows_affected.iter().map(|&count| Message::rows_affected(count)))
        .collect()
}
