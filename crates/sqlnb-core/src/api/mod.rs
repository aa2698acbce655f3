pub mod client;
pub mod models;

pub use client::{RecordedExecutor, StatementExecutor};
pub use models::{RawBatch, RawColumn, RawMessage, RawResultSet};
